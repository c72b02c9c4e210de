//! HTTP layer: wire DTOs and axum handlers over the game registry.
//!
//! The wire format keeps the original API's string-typed fields
//! (`"id": "1"`, `"gameOver": "true"`); conversion to and from the
//! internal enum/integer types happens only in this module.

use crate::game::{Game, Mark, Square};
use crate::registry::{GameId, GameRegistry};
use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Wire view of a game, all fields stringified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameView {
    /// Game id as a decimal string.
    pub id: String,
    /// 9 squares row-major, `.` for empty, e.g. `"XXX......"`.
    pub board: String,
    /// Mark that moves next, `"X"` or `"O"`.
    #[serde(rename = "nextTurn")]
    pub next_turn: String,
    /// `"true"` once the game has ended.
    #[serde(rename = "gameOver")]
    pub game_over: String,
    /// Winning mark, or `""` while ongoing or drawn.
    pub winner: String,
}

impl From<&Game> for GameView {
    fn from(game: &Game) -> Self {
        let board = game
            .board()
            .squares()
            .iter()
            .map(|s| match s {
                Square::Empty => '.',
                Square::Taken(Mark::X) => 'X',
                Square::Taken(Mark::O) => 'O',
            })
            .collect();

        Self {
            id: game.id().to_string(),
            board,
            next_turn: game.next_turn().to_string(),
            game_over: game.is_over().to_string(),
            winner: game.winner().map(|m| m.to_string()).unwrap_or_default(),
        }
    }
}

/// Wire response carrying a freshly created game id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdView {
    /// Game id as a decimal string.
    pub id: String,
}

/// Wire request for `POST /games/move`, all fields strings.
///
/// Fields default to empty so a missing field is reported as a required
/// field rather than a decode failure, matching the original API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MoveRequest {
    /// Target game id.
    #[serde(rename = "gameId", default)]
    pub game_id: String,
    /// Cell index 0-8.
    #[serde(default)]
    pub location: String,
    /// `"X"` or `"O"`.
    #[serde(default)]
    pub player: String,
}

/// Wire error body, `{"error": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorView {
    /// Human-readable message.
    pub error: String,
}

/// Handler failure surfaced to the client as HTTP 400.
///
/// The API reports every failure class the same way: validation errors,
/// unknown games, and rule violations all get a 400 with a message.
#[derive(Debug)]
pub struct ApiError {
    message: String,
}

impl ApiError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        warn!(error = %self.message, "Request failed");
        let body = ErrorView {
            error: self.message,
        };
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

/// Builds the application router with all game routes.
pub fn router(registry: GameRegistry) -> Router {
    Router::new()
        .route("/games", get(list_games).post(create_game))
        .route("/games/{id}", get(get_game))
        .route("/games/move", post(make_move))
        .with_state(registry)
}

/// `GET /games` — all games as wire views.
#[instrument(skip(registry))]
async fn list_games(State(registry): State<GameRegistry>) -> Json<Vec<GameView>> {
    let games = registry.list();
    info!(count = games.len(), "Listing games");
    Json(games.iter().map(GameView::from).collect())
}

/// `GET /games/{id}` — one game, or 400 for a bad or unknown id.
#[instrument(skip(registry))]
async fn get_game(
    State(registry): State<GameRegistry>,
    Path(id): Path<String>,
) -> Result<Json<GameView>, ApiError> {
    let game_id: GameId = id.parse().map_err(|_| ApiError::new("bad id provided"))?;

    let game = registry
        .get(game_id)
        .map_err(|_| ApiError::new("game does not exist"))?;

    debug!(game_id, "Fetched game");
    Ok(Json(GameView::from(&game)))
}

/// `POST /games` — creates a game, responds 201 with its id.
#[instrument(skip(registry))]
async fn create_game(State(registry): State<GameRegistry>) -> (StatusCode, Json<IdView>) {
    let id = registry.create();
    info!(game_id = id, "Created game via API");
    (StatusCode::CREATED, Json(IdView { id: id.to_string() }))
}

/// `POST /games/move` — applies a move, responds 200 with an empty body.
///
/// Validation order matches the original API: fields present, gameId
/// parses, game exists, location parses, player parses, then the move
/// itself. The body is decoded by hand so malformed JSON surfaces the
/// decoder's message with a 400 instead of the framework's rejection.
#[instrument(skip(registry, body))]
async fn make_move(
    State(registry): State<GameRegistry>,
    body: String,
) -> Result<StatusCode, ApiError> {
    let req: MoveRequest = serde_json::from_str(&body).map_err(|e| ApiError::new(e.to_string()))?;

    if req.game_id.is_empty() || req.location.is_empty() || req.player.is_empty() {
        return Err(ApiError::new(
            "'gameId', 'location' and 'player' fields required",
        ));
    }

    let game_id: GameId = req
        .game_id
        .parse()
        .map_err(|_| ApiError::new("bad gameId provided"))?;

    // Existence check before parsing the location, as the original does.
    registry
        .get(game_id)
        .map_err(|_| ApiError::new("game does not exist"))?;

    let location: usize = req
        .location
        .parse()
        .map_err(|_| ApiError::new("bad location provided"))?;

    let player: Mark = req
        .player
        .parse()
        .map_err(|_| ApiError::new("bad player provided"))?;

    registry
        .apply_move(game_id, player, location)
        .map_err(|e| ApiError::new(e.to_string()))?;

    info!(game_id, %player, location, "Move accepted");
    Ok(StatusCode::OK)
}
