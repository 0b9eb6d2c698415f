use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::api::errors::ApiError;
use crate::api::state::AppState;
use crate::domain::team::{require_fields, Team, TeamListState};

/// Request body for registering a team
///
/// Every field defaults to empty so that missing values are reported by
/// the presence check rather than rejected as malformed JSON.
#[derive(Debug, Deserialize)]
pub struct RegisterTeamRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub founding_year: String,
    #[serde(default)]
    pub title_count: String,
    #[serde(default)]
    pub image_url: String,
}

/// Response from team registration
#[derive(Debug, Serialize)]
pub struct RegisteredResponse {
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct TeamResponse {
    pub id: String,
    pub name: String,
    pub founding_year: String,
    pub title_count: String,
    pub image_url: String,
}

impl From<&Team> for TeamResponse {
    fn from(team: &Team) -> Self {
        Self {
            id: team.id().to_string(),
            name: team.name().to_string(),
            founding_year: team.founding_year().to_string(),
            title_count: team.title_count().to_string(),
            image_url: team.image_url().to_string(),
        }
    }
}

/// Current team list plus the state of the live subscription
#[derive(Debug, Serialize)]
pub struct TeamListResponse {
    pub teams: Vec<TeamResponse>,
    pub watching: bool,
    pub last_error: Option<String>,
}

impl From<&TeamListState> for TeamListResponse {
    fn from(state: &TeamListState) -> Self {
        Self {
            teams: state.teams().iter().map(TeamResponse::from).collect(),
            watching: state.is_watching(),
            last_error: state.last_error().map(str::to_string),
        }
    }
}

/// Register a new team
///
/// POST /api/teams
pub async fn register_team(
    State(state): State<AppState>,
    Json(req): Json<RegisterTeamRequest>,
) -> Result<(StatusCode, Json<RegisteredResponse>), ApiError> {
    let team = Team::new(req.name, req.founding_year, req.title_count, req.image_url);

    require_fields(&team)?;

    let id = state.registry.register(&team).await?;

    Ok((StatusCode::CREATED, Json(RegisteredResponse { id })))
}

/// List the teams currently known to the registry
///
/// GET /api/teams
pub async fn list_teams(State(state): State<AppState>) -> Json<TeamListResponse> {
    let snapshot = state.registry.snapshot();

    Json(TeamListResponse::from(&snapshot))
}
