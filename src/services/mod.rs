pub mod navigation;
pub mod route_resolver;

pub use navigation::route_from_location;
pub use route_resolver::{RouteResolver, LOAD_ERROR_TITLE};
