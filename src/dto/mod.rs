pub mod inventory_location;
pub mod locations;
