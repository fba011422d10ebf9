/*
 * Responsibility
 * - URL layout of v1
 * - which routes sit behind the access gate is decided here and nowhere else
 */
use axum::{
    Router,
    routing::{get, post, put},
};

use crate::api::v1::handlers::{
    auth::{login, me, register},
    budget::{get_budget, put_budget},
    health::health,
    summary::get_summary,
    transactions::{create_transaction, delete_transaction, list_transactions, update_transaction},
};
use crate::middleware;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/health", get(health))
        .route("/auth/register", post(register))
        .route("/auth/login", post(login));

    let protected = Router::new()
        .route("/auth/me", get(me))
        .route(
            "/transactions",
            get(list_transactions).post(create_transaction),
        )
        .route(
            "/transactions/{transaction_id}",
            put(update_transaction).delete(delete_transaction),
        )
        .route("/budget", get(get_budget).put(put_budget))
        .route("/summary", get(get_summary));
    let protected = middleware::auth::access::apply(protected, state);

    public.merge(protected)
}
