//! Command routing logic for CLI

use crate::args::{CategoryAction, Cli, Commands, ConfigAction, DishAction, UserAction};
use crate::commands;
use crate::console::CliConsole;
use foodweb_core::config::{ClientConfig, ConfigLoader};
use foodweb_core::context::FoodwebContext;
use foodweb_core::error::FoodwebResult;
use std::collections::HashMap;
use std::process::ExitCode;
use std::sync::Arc;

/// Route CLI commands to their respective handlers
///
/// Errors are printed here; the returned code only tells the shell.
pub async fn route(cli: Cli) -> ExitCode {
    let console = CliConsole::new(cli.verbose);

    match dispatch(&cli, console).await {
        Ok(code) => code,
        Err(e) => {
            tracing::debug!("Command failed: {:?}", e);
            console.error(e.message());
            ExitCode::FAILURE
        }
    }
}

async fn dispatch(cli: &Cli, console: CliConsole) -> FoodwebResult<ExitCode> {
    let done = match &cli.command {
        // Configuration commands work without a reachable backend
        Commands::Config { action } => route_config(cli, action, &console).await,
        Commands::Login { username, password } => {
            let ctx = open_context(cli, console).await?;
            let signed_in =
                commands::auth::login(&ctx, &console, username, password.clone()).await?;
            return Ok(if signed_in {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            });
        }
        Commands::Logout => {
            let ctx = open_context(cli, console).await?;
            commands::auth::logout(&ctx).await
        }
        Commands::Whoami => {
            let ctx = open_context(cli, console).await?;
            commands::auth::whoami(&ctx, &console)
        }
        Commands::Register {
            username,
            password,
            email,
            phone,
            code,
        } => {
            let ctx = open_context(cli, console).await?;
            let form = commands::auth::Registration {
                username: username.clone(),
                password: password.clone(),
                email: email.clone(),
                phone: phone.clone(),
                code: code.clone(),
            };
            commands::auth::register(&ctx, &console, form).await
        }
        Commands::SendCode { email } => {
            let ctx = open_context(cli, console).await?;
            commands::auth::send_code(&ctx, &console, email).await
        }
        Commands::User { action } => {
            let ctx = open_context(cli, console).await?;
            route_user(&ctx, &console, action).await
        }
        Commands::Category { action } => {
            let ctx = open_context(cli, console).await?;
            route_category(&ctx, &console, action).await
        }
        Commands::Dish { action } => {
            let ctx = open_context(cli, console).await?;
            route_dish(&ctx, &console, action).await
        }
        Commands::Upload { file } => {
            let ctx = open_context(cli, console).await?;
            commands::upload::upload(&ctx, &console, file).await
        }
        Commands::Open { path } => {
            let ctx = open_context(cli, console).await?;
            commands::open::open(&ctx, &console, path)
        }
    };

    done.map(|_| ExitCode::SUCCESS)
}

/// Effective configuration: defaults, file, environment, then flags
pub fn load_config(cli: &Cli) -> FoodwebResult<ClientConfig> {
    let mut args = HashMap::new();
    if let Some(base_url) = &cli.base_url {
        args.insert("base_url".to_string(), base_url.clone());
    }

    ConfigLoader::new()
        .with_file(&cli.config_file)
        .with_env()
        .with_args(args)
        .load()
}

async fn open_context(cli: &Cli, console: CliConsole) -> FoodwebResult<FoodwebContext> {
    let config = load_config(cli)?;
    let ctx = FoodwebContext::builder()
        .with_config(config)
        .with_notifier(Arc::new(console))
        .build()?;
    ctx.sessions().restore().await;
    Ok(ctx)
}

async fn route_config(
    cli: &Cli,
    action: &ConfigAction,
    console: &CliConsole,
) -> FoodwebResult<()> {
    match action {
        ConfigAction::Show => commands::config::show(cli, console),
        ConfigAction::Init { force } => {
            commands::config::init(&cli.config_file, cli.base_url.as_deref(), *force, console)
                .await
        }
    }
}

async fn route_user(
    ctx: &FoodwebContext,
    console: &CliConsole,
    action: &UserAction,
) -> FoodwebResult<()> {
    match action {
        UserAction::List { page, size } => commands::user::list(ctx, console, *page, *size).await,
        UserAction::Show { id } => commands::user::show(ctx, console, *id).await,
    }
}

async fn route_category(
    ctx: &FoodwebContext,
    console: &CliConsole,
    action: &CategoryAction,
) -> FoodwebResult<()> {
    match action {
        CategoryAction::List => commands::category::list(ctx, console).await,
        CategoryAction::Show { id } => commands::category::show(ctx, console, *id).await,
        CategoryAction::Add { name } => commands::category::add(ctx, console, name).await,
        CategoryAction::Update { id, name } => {
            commands::category::update(ctx, console, *id, name).await
        }
        CategoryAction::Delete { id, yes } => {
            commands::category::delete(ctx, console, *id, *yes).await
        }
    }
}

async fn route_dish(
    ctx: &FoodwebContext,
    console: &CliConsole,
    action: &DishAction,
) -> FoodwebResult<()> {
    match action {
        DishAction::List => commands::dish::list(ctx, console).await,
        DishAction::Hot => commands::dish::hot(ctx, console).await,
        DishAction::Show { id } => commands::dish::show(ctx, console, *id).await,
        DishAction::Search {
            title,
            category,
            page,
            size,
        } => {
            let params = foodweb_core::types::DishSearchParams {
                title: title.clone(),
                category_id: *category,
                page: *page,
                size: *size,
            };
            commands::dish::search(ctx, console, &params).await
        }
        DishAction::Add { fields } => commands::dish::add(ctx, console, fields).await,
        DishAction::Update { id, fields } => {
            commands::dish::update(ctx, console, *id, fields).await
        }
        DishAction::Delete { id, yes } => commands::dish::delete(ctx, console, *id, *yes).await,
    }
}
