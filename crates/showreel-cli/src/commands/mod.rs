pub mod demo;
pub mod recommend;
pub mod report;
