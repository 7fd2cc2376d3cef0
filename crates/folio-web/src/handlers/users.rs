use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use folio_core::access::{
    evaluate, user_roles_field_access, AccessDecision, Collection, Operation, Principal,
    PrincipalId, RoleSet,
};
use folio_core::error::FolioError;

use super::require;
use crate::app_state::AppState;
use crate::context::CurrentPrincipal;
use crate::error::ApiResult;
use crate::store::{UserDraft, UserPatch};
use crate::views::UserView;

fn can_see_roles(principal: Option<&Principal>) -> bool {
    user_roles_field_access(Operation::Read, principal) == AccessDecision::Allow
}

fn check_email(email: &str) -> Result<(), FolioError> {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(FolioError::BadRequest(format!("invalid email: {email}"))),
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterReq {
    pub email: String,
    #[serde(default)]
    pub roles: Option<RoleSet>,
}

/// Open registration. Requested roles are kept only for admins; everyone else
/// gets the default role set.
pub async fn register(
    State(app): State<AppState>,
    principal: CurrentPrincipal,
    Json(req): Json<RegisterReq>,
) -> ApiResult<(StatusCode, Json<UserView>)> {
    let p = principal.get();
    require(evaluate(Collection::Users, Operation::Create, p, None), Collection::Users, Operation::Create)?;
    check_email(&req.email)?;

    let roles = match req.roles {
        Some(roles) if user_roles_field_access(Operation::Create, p) == AccessDecision::Allow => roles,
        Some(_) => {
            tracing::debug!("roles dropped from registration without field access");
            RoleSet::default_for_new_user()
        }
        None => RoleSet::default_for_new_user(),
    };
    let roles = if roles.is_empty() { RoleSet::default_for_new_user() } else { roles };

    let user = app
        .store()
        .insert_user(UserDraft {
            email: req.email.trim().to_string(),
            roles,
        })
        .await?;
    tracing::info!(user_id = %user.id, "user registered");
    Ok((StatusCode::CREATED, Json(UserView::new(user, can_see_roles(p)))))
}

pub async fn list_users(
    State(app): State<AppState>,
    principal: CurrentPrincipal,
) -> ApiResult<Json<Vec<UserView>>> {
    let p = principal.get();
    let decision = require(
        evaluate(Collection::Users, Operation::Read, p, None),
        Collection::Users,
        Operation::Read,
    )?;
    let show_roles = can_see_roles(p);
    let users = app.store().find_users(decision.filter()).await?;
    Ok(Json(users.into_iter().map(|u| UserView::new(u, show_roles)).collect()))
}

pub async fn get_user(
    State(app): State<AppState>,
    principal: CurrentPrincipal,
    Path(id): Path<String>,
) -> ApiResult<Json<UserView>> {
    let p = principal.get();
    let target = PrincipalId::new(id.clone());
    let decision = require(
        evaluate(Collection::Users, Operation::Read, p, Some(&target)),
        Collection::Users,
        Operation::Read,
    )?;
    let user = app.store().get_user(&id, decision.filter()).await?;
    Ok(Json(UserView::new(user, can_see_roles(p))))
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateUserReq {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub roles: Option<RoleSet>,
}

pub async fn update_user(
    State(app): State<AppState>,
    principal: CurrentPrincipal,
    Path(id): Path<String>,
    Json(req): Json<UpdateUserReq>,
) -> ApiResult<Json<UserView>> {
    let p = principal.get();
    let target = PrincipalId::new(id.clone());
    let decision = require(
        evaluate(Collection::Users, Operation::Update, p, Some(&target)),
        Collection::Users,
        Operation::Update,
    )?;
    if req.roles.is_some() {
        require(
            user_roles_field_access(Operation::Update, p),
            Collection::Users,
            Operation::Update,
        )
        .map_err(|_| FolioError::NotAllowed("update roles".into()))?;
    }
    if let Some(email) = &req.email {
        check_email(email)?;
    }

    let patch = UserPatch {
        email: req.email.map(|e| e.trim().to_string()),
        roles: req.roles,
    };
    let user = app.store().update_user(&id, decision.filter(), patch).await?;
    Ok(Json(UserView::new(user, can_see_roles(p))))
}

pub async fn delete_user(
    State(app): State<AppState>,
    principal: CurrentPrincipal,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    require(
        evaluate(Collection::Users, Operation::Delete, principal.get(), None),
        Collection::Users,
        Operation::Delete,
    )?;
    app.store().delete_user(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
