pub mod accuracy;
pub mod candidate;
pub mod flags;
pub mod poll;
pub mod profile;
pub mod results;
