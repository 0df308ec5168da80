use clap::Parser;
use serde_json::json;

use crate::{
    cli::Invocation,
    prelude::*,
    session::{MemoryStore, Route, Session},
    tables::build_route_table,
};

#[derive(Parser)]
pub struct RouteArgs {
    /// Requested path, for example `/dashboard`.
    #[clap(default_value = "/")]
    pub path: String,

    /// Log in with these credentials first.
    #[clap(long, requires = "password")]
    pub email: Option<String>,

    #[clap(long, requires = "email", env = "KILOWATTAGE_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Log out again before resolving the route.
    #[clap(long)]
    pub logout: bool,
}

#[instrument(skip_all, fields(path = %args.path))]
pub fn route(invocation: &Invocation, args: &RouteArgs) -> Result {
    let mut session = Session::new(MemoryStore::default());
    if let (Some(email), Some(password)) = (&args.email, &args.password) {
        session.login(email, password).context("login failed")?;
    }
    if args.logout {
        session.logout();
    }

    let requested = Route::parse(&args.path);
    let resolved = session.resolve(requested);
    let auth_state = session.auth_state();
    if requested != resolved {
        info!(%requested, %resolved, "redirected");
    }
    invocation.emit(&json!({ "requested": requested, "resolved": resolved, "auth": auth_state }), || {
        vec![build_route_table(requested, resolved, &auth_state)]
    })
}
