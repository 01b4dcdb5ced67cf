pub mod artifacts;
pub mod executable_utils;
pub mod model;
pub mod predictor;
pub mod web;
