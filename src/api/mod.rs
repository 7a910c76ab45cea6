use rocket::Route;

mod question;

pub fn routes() -> Vec<Route> {
    let mut routes = Vec::new();
    routes.extend(question::routes());
    routes
}
