use rembees_domain::{Displayable, Theme, User, UserUpdate};

use crate::{
    app::AppContext,
    cli::{args::ParsedArgs, output, CommandResult},
    errors::AppError,
};

use super::CommandDefinition;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new("login", "Sign in with an email", "login <email>", cmd_login),
        CommandDefinition::new("logout", "Sign out", "logout", cmd_logout),
        CommandDefinition::new("whoami", "Show the signed-in user", "whoami", cmd_whoami),
        CommandDefinition::new(
            "profile",
            "Show or update the signed-in profile",
            "profile [--name NAME] [--email EMAIL] [--avatar DATA] [--clear-avatar]",
            cmd_profile,
        ),
        CommandDefinition::new(
            "theme",
            "Show or change the color theme",
            "theme [dark|light|matrix|purple|neon]",
            cmd_theme,
        ),
    ]
}

fn cmd_login(context: &mut AppContext, args: &[&str]) -> CommandResult {
    let [email] = args else {
        return Err(AppError::Usage("usage: login <email>".into()));
    };
    context.store.login(email)?;
    let name = context.store.user().map(|user| user.name.as_str()).unwrap_or_default();
    output::success(format!("Welcome, {}!", name));
    Ok(())
}

fn cmd_logout(context: &mut AppContext, args: &[&str]) -> CommandResult {
    if !args.is_empty() {
        return Err(AppError::Usage("usage: logout".into()));
    }
    if !context.store.is_logged_in() {
        output::info("Not logged in.");
        return Ok(());
    }
    let label = context
        .store
        .user()
        .map(|user| user.display_label())
        .unwrap_or_default();
    context.store.logout()?;
    output::success(format!("Logged out {}.", label));
    Ok(())
}

fn cmd_whoami(context: &mut AppContext, args: &[&str]) -> CommandResult {
    if !args.is_empty() {
        return Err(AppError::Usage("usage: whoami".into()));
    }
    match context.store.user() {
        Some(user) => print_user(user),
        None => output::info("Not logged in."),
    }
    Ok(())
}

fn cmd_profile(context: &mut AppContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(
        args,
        &["--name", "--email", "--avatar"],
        &["--clear-avatar"],
    )?;
    if let Some(extra) = parsed.positionals.first() {
        return Err(AppError::Usage(format!("unexpected argument `{}`", extra)));
    }
    if parsed.value("--avatar").is_some() && parsed.has("--clear-avatar") {
        return Err(AppError::Usage(
            "--avatar and --clear-avatar cannot be combined".into(),
        ));
    }

    let mut update = UserUpdate::default();
    if let Some(name) = parsed.value("--name") {
        update = update.name(name);
    }
    if let Some(email) = parsed.value("--email") {
        update = update.email(email);
    }
    if let Some(avatar) = parsed.value("--avatar") {
        update = update.avatar(avatar);
    }
    if parsed.has("--clear-avatar") {
        update = update.clear_avatar();
    }

    if update.is_empty() {
        return match context.store.user() {
            Some(user) => {
                print_user(user);
                Ok(())
            }
            None => Err(AppError::Usage("not logged in; run `rembees login <email>`".into())),
        };
    }

    if !context.store.update_user(update)? {
        return Err(AppError::Usage("not logged in; run `rembees login <email>`".into()));
    }
    output::success("Profile updated.");
    Ok(())
}

fn cmd_theme(context: &mut AppContext, args: &[&str]) -> CommandResult {
    match args {
        [] => {
            let current = context.store.theme();
            output::info(format!("Current theme: {}", current));
            let names: Vec<&str> = Theme::ALL.iter().map(|theme| theme.as_str()).collect();
            println!("Available: {}", names.join(", "));
            Ok(())
        }
        [name] => {
            let theme: Theme = name
                .parse()
                .map_err(|err: rembees_domain::ParseThemeError| {
                    AppError::InvalidArgument(err.to_string())
                })?;
            context.store.set_theme(theme)?;
            output::success(format!("Theme set to {}.", theme));
            Ok(())
        }
        _ => Err(AppError::Usage("usage: theme [name]".into())),
    }
}

fn print_user(user: &User) {
    output::section("Profile");
    println!("  Name   : {}", user.name);
    println!("  Email  : {}", user.email);
    println!(
        "  Avatar : {}",
        if user.avatar.is_some() { "set" } else { "none" }
    );
}
