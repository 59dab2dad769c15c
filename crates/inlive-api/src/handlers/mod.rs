//! HTTP handlers, one module per resource.

pub mod accommodation;
pub mod auth;
pub mod city;
pub mod dictionary;
pub mod district;
pub mod health;
pub mod price_request;
pub mod reservation;
pub mod search_request;
pub mod unit;
pub mod user;
