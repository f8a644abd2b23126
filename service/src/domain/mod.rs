//! Domain definitions.

pub mod admin;
pub mod building;
pub mod city;
pub mod contact;
pub mod content;
pub mod geo;
pub mod inquiry;
pub mod search;
mod text;
pub mod unit;

pub use self::{
    admin::Admin,
    building::Building,
    city::City,
    inquiry::Inquiry,
    search::SearchQuery,
    text::{Description, ImageUrl, Name},
    unit::Unit,
};
