pub mod country;
pub mod gdp;
pub mod queries;
pub mod schema;
