// Inventory collaborators
pub mod inventory;

// Placement of inventory into bins
pub mod inventory_location;
