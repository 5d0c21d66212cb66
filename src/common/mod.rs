pub mod option;
pub mod time_point;
pub mod time_series;
