pub mod broadcast;
pub mod countdown;
