mod test_displacement_basic;
mod test_spline_basic;
mod test_tube_basic;
