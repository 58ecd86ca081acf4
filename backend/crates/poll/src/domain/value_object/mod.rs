pub mod option_name;
pub mod poll_title;
