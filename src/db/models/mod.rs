//! Data models
//!
//! One module per table. Each entity has its row struct plus `XCreate` /
//! `XUpdate` payload structs. Wire format is camelCase; columns are
//! snake_case.

pub mod catalog;
pub mod category;
pub mod home_product;
pub mod movement;
pub mod product;
pub mod recipe;
pub mod store;
pub mod store_product;
pub mod unit;

pub use catalog::{CatalogCreate, CatalogEntry, CatalogEntryRow, CatalogSection, CatalogUpdate};
pub use category::{Category, CategoryCreate, CategoryUpdate};
pub use home_product::{HomeProduct, HomeProductCreate, HomeProductUpdate, HomeSection};
pub use movement::{Movement, MovementCreate, MovementKind};
pub use product::{
    Product, ProductCreate, ProductKind, ProductRow, ProductUpdate, ProductWithRefs,
    ProductWithRefsRow,
};
pub use recipe::{RecipeItem, RecipeItemCreate, RecipeItemKind, RecipeItemWithProduct};
pub use store::{Store, StoreCreate, StorePublic, StoreUpdate};
pub use store_product::{
    AssignProducts, PlacementProduct, PlacementToggle, StoreProduct, StoreProductView,
    StoreProductViewRow,
};
pub use unit::{Unit, UnitCreate, UnitUpdate};
