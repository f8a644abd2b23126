//! Read entities definitions.

pub mod building;
pub mod city;
pub mod inquiry;
pub mod unit;
