mod chebyshev;
mod composite;
mod elements;
mod tle_traj;
