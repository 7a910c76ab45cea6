#[macro_use]
extern crate rocket;

#[cfg(test)]
#[macro_use]
extern crate db_test;

use rocket::{Build, Rocket};

use crate::config::DatabaseFairing;
use crate::logging::LoggerFairing;

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;

/// Assemble the server: the question routes plus the logging and database
/// fairings. The database connection itself is made at ignition.
pub fn build() -> Rocket<Build> {
    rocket::build()
        .mount("/", api::routes())
        .attach(LoggerFairing)
        .attach(DatabaseFairing)
}

#[cfg(test)]
pub(crate) async fn client_and_db() -> (rocket::local::asynchronous::Client, mongodb::Database) {
    let client = rocket::local::asynchronous::Client::tracked(build())
        .await
        .expect("Failed to ignite test instance");
    let db = client
        .rocket()
        .state::<mongodb::Database>()
        .expect("Database missing from managed state")
        .clone();
    (client, db)
}
