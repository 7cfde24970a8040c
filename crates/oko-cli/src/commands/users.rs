use crate::commands::{print_json, Context};
use crate::error::invalid_input;
use crate::util::{format_timestamp_datetime, now_utc};
use anyhow::Result;
use clap::{Args, Subcommand};
use oko_core::domain::validate_email;
use oko_store::repo::VerifyOutcome;
use serde::Serialize;

#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Register a user
    Add(AddUserArgs),
    /// Check stored credentials
    Verify(VerifyUserArgs),
    Ls(ListUsersArgs),
    Rm(RemoveUserArgs),
}

#[derive(Debug, Args)]
pub struct AddUserArgs {
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub password: String,
}

#[derive(Debug, Args)]
pub struct VerifyUserArgs {
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub password: String,
}

#[derive(Debug, Args)]
pub struct ListUsersArgs {}

#[derive(Debug, Args)]
pub struct RemoveUserArgs {
    pub email: String,
}

#[derive(Debug, Serialize)]
struct UserDto {
    email: String,
    created_at: i64,
}

pub fn add_user(ctx: &Context<'_>, args: AddUserArgs) -> Result<()> {
    let email = args.email.trim().to_ascii_lowercase();
    if !validate_email(&email) {
        return Err(invalid_input(format!("invalid email address: {email}")));
    }
    if args.password.chars().count() < ctx.config.min_password_len {
        return Err(invalid_input(format!(
            "password must be at least {} characters",
            ctx.config.min_password_len
        )));
    }

    let user = ctx.store.users().register(now_utc(), &email, &args.password)?;
    if ctx.json {
        print_json(&UserDto {
            email: user.email,
            created_at: user.created_at,
        })?;
    } else {
        println!("registered {}", user.email);
    }
    Ok(())
}

pub fn verify_user(ctx: &Context<'_>, args: VerifyUserArgs) -> Result<()> {
    match ctx.store.users().verify(&args.email, &args.password)? {
        VerifyOutcome::Verified => {
            println!("ok");
            Ok(())
        }
        VerifyOutcome::WrongPassword => Err(invalid_input("wrong password")),
        VerifyOutcome::UnknownUser => Err(crate::error::not_found(format!(
            "user {}",
            args.email.trim().to_ascii_lowercase()
        ))),
    }
}

pub fn list_users(ctx: &Context<'_>, _args: ListUsersArgs) -> Result<()> {
    let users = ctx.store.users().list()?;
    if ctx.json {
        let dtos: Vec<UserDto> = users
            .into_iter()
            .map(|user| UserDto {
                email: user.email,
                created_at: user.created_at,
            })
            .collect();
        return print_json(&dtos);
    }
    for user in users {
        println!(
            "{}  {}",
            user.email,
            format_timestamp_datetime(user.created_at)
        );
    }
    Ok(())
}

pub fn remove_user(ctx: &Context<'_>, args: RemoveUserArgs) -> Result<()> {
    if !ctx.store.users().delete(&args.email)? {
        return Err(crate::error::not_found(format!("user {}", args.email)));
    }
    println!("removed {}", args.email.trim().to_ascii_lowercase());
    Ok(())
}
