mod propagation;
mod tle;
