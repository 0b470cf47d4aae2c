pub mod error;
pub mod messages;
pub mod state;
pub mod view;
pub mod workspace;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

/// All JSON routes over one shared store. Layers (CORS, tracing) are added
/// by the binary.
pub fn router(state: AppState) -> Router {
    let workspace_routes = Router::new()
        .route("/health", get(workspace::health))
        .route("/channels", get(workspace::list_channels))
        .route("/session", get(workspace::get_session))
        .route("/session/connect", post(workspace::connect))
        .route("/session/disconnect", post(workspace::disconnect))
        .route("/stats", get(workspace::get_stats))
        .route("/activity", get(workspace::recent_activity));

    let message_routes = Router::new()
        .route("/messages", get(messages::list_messages).post(messages::create_message))
        .route("/messages/preview", post(messages::preview_message))
        .route("/messages/bulk-cancel", post(messages::bulk_cancel))
        .route("/messages/bulk-delete", post(messages::bulk_delete))
        .route(
            "/messages/{message_id}",
            get(messages::get_message)
                .patch(messages::update_message)
                .delete(messages::delete_message),
        )
        .route("/messages/{message_id}/cancel", post(messages::cancel_message))
        .route("/messages/{message_id}/send", post(messages::send_message));

    let view_routes = Router::new()
        .route("/view", get(view::get_view))
        .route("/view/filter", put(view::set_filter))
        .route("/view/selection", post(view::set_selection))
        .route("/view/selection/all", post(view::select_all))
        .route("/view/cancel-selected", post(view::cancel_selected))
        .route("/view/delete-selected", post(view::delete_selected));

    Router::new()
        .merge(workspace_routes)
        .merge(message_routes)
        .merge(view_routes)
        .with_state(state)
}
