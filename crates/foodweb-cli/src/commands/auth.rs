//! Sign-in, sign-out and account creation

use crate::console::CliConsole;
use foodweb_core::context::FoodwebContext;
use foodweb_core::error::{FoodwebError, FoodwebResult};
use foodweb_core::services;
use foodweb_core::types::{LoginRequest, RegisterRequest};

/// Sign in; `false` means the failure was already reported
pub async fn login(
    ctx: &FoodwebContext,
    console: &CliConsole,
    username: &str,
    password: Option<String>,
) -> FoodwebResult<bool> {
    let password = match password {
        Some(password) => password,
        None => prompt_password("Password", false)?,
    };

    if !ctx.sessions().login(&LoginRequest::new(username, password)).await {
        return Ok(false);
    }

    if let Some(user) = ctx.sessions().user() {
        console.field("user", &user.username);
        console.field("role", user.role);
    }
    Ok(true)
}

pub async fn logout(ctx: &FoodwebContext) -> FoodwebResult<()> {
    ctx.sessions().logout().await;
    Ok(())
}

pub fn whoami(ctx: &FoodwebContext, console: &CliConsole) -> FoodwebResult<()> {
    let sessions = ctx.sessions();
    if !sessions.is_logged_in() {
        console.warn("Not logged in");
        return Ok(());
    }

    match sessions.user() {
        Some(user) => {
            console.print_header("Current user");
            console.field("id", user.user_id);
            console.field("username", &user.username);
            console.field("role", user.role);
            if !user.email.is_empty() {
                console.field("email", &user.email);
            }
        }
        None => console.warn("Logged in, but no user details are stored"),
    }
    Ok(())
}

/// Registration form as given on the command line
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub password: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub code: String,
}

pub async fn register(
    ctx: &FoodwebContext,
    console: &CliConsole,
    form: Registration,
) -> FoodwebResult<()> {
    let password = match form.password {
        Some(password) => password,
        None => prompt_password("Choose a password", true)?,
    };
    if form.code.trim().is_empty() {
        return Err(FoodwebError::invalid_input("verification code is required"));
    }

    let request = RegisterRequest {
        username: form.username,
        password_hash: password,
        email: form.email,
        phone: form.phone.filter(|p| !p.trim().is_empty()),
    };
    let user = ctx
        .client()
        .send(services::user::register(&request, form.code.trim()))
        .await?;

    console.success(&format!("Registered {} (id {})", user.username, user.user_id));
    console.info("Sign in with `foodweb login`");
    Ok(())
}

pub async fn send_code(
    ctx: &FoodwebContext,
    console: &CliConsole,
    email: &str,
) -> FoodwebResult<()> {
    let email = email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(FoodwebError::invalid_input(format!(
            "not an email address: '{}'",
            email
        )));
    }

    ctx.client()
        .send(services::user::send_verification_code(email))
        .await?;
    console.success(&format!("Verification code sent to {}", email));
    Ok(())
}

fn prompt_password(prompt: &str, confirm: bool) -> FoodwebResult<String> {
    let mut input = dialoguer::Password::new().with_prompt(prompt);
    if confirm {
        input = input.with_confirmation("Repeat password", "Passwords do not match");
    }
    input
        .interact()
        .map_err(|e| FoodwebError::invalid_input(format!("Could not read password: {}", e)))
}
