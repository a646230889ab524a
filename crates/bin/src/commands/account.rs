//! Account commands: signup, login, logout, whoami and the admin user list.

use serde::Serialize;
use sitebuilder::{notify::SIGNUP_SUCCESS_MESSAGE, user::User};

use crate::backend::Profile;
use crate::cli::{LoginArgs, ProfileOnlyArgs, SignupArgs};
use crate::output::{OutputFormat, print_json, print_table};

/// Public view of an account; the password hash never leaves the store.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AccountView<'a> {
    name: &'a str,
    email: &'a str,
    is_admin: bool,
}

impl<'a> From<&'a User> for AccountView<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            name: &user.name,
            email: &user.email,
            is_admin: user.is_admin(),
        }
    }
}

/// Run the `signup` command
pub async fn signup(
    args: &SignupArgs,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let profile = Profile::open(&args.profile).await?;
    let user = profile
        .instance()
        .signup(&args.name, &args.username, &args.password)?;
    profile.save()?;

    match format {
        OutputFormat::Human => {
            println!("{SIGNUP_SUCCESS_MESSAGE}");
            println!("Email: {}", user.email);
        }
        OutputFormat::Json => print_json(&AccountView::from(&user))?,
    }
    Ok(())
}

/// Run the `login` command
pub async fn login(
    args: &LoginArgs,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let profile = Profile::open(&args.profile).await?;
    let mut session = profile.session()?;
    let user = profile
        .instance()
        .login(&mut session, &args.email, &args.password)?;
    profile.save()?;

    match format {
        OutputFormat::Human => println!("Logged in as {} <{}>", user.name, user.email),
        OutputFormat::Json => print_json(&AccountView::from(&user))?,
    }
    Ok(())
}

/// Run the `logout` command
pub async fn logout(
    args: &ProfileOnlyArgs,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let profile = Profile::open(&args.profile).await?;
    let mut session = profile.session()?;
    let was_logged_in = session.is_authenticated();
    profile.instance().logout(&mut session)?;
    profile.save()?;

    match format {
        OutputFormat::Human if was_logged_in => println!("Logged out"),
        OutputFormat::Human => println!("Not logged in"),
        OutputFormat::Json => print_json(&serde_json::json!({ "loggedOut": was_logged_in }))?,
    }
    Ok(())
}

/// Run the `whoami` command
pub async fn whoami(
    args: &ProfileOnlyArgs,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let profile = Profile::open(&args.profile).await?;
    let session = profile.session()?;

    match (format, session.user()) {
        (OutputFormat::Human, Some(user)) => {
            let role = if user.is_admin() { "admin" } else { "standard" };
            println!("{} <{}> ({role})", user.name, user.email);
        }
        (OutputFormat::Human, None) => println!("Not logged in"),
        (OutputFormat::Json, user) => print_json(&user.map(AccountView::from))?,
    }
    Ok(())
}

/// Run the `users` command (administrator only)
pub async fn users(
    args: &ProfileOnlyArgs,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let profile = Profile::open(&args.profile).await?;
    let session = profile.session()?;
    session.require_user()?;
    if !session.is_admin() {
        return Err("only the administrator can list accounts".into());
    }

    let users = profile.instance().directory().list()?;
    match format {
        OutputFormat::Human => {
            let rows: Vec<Vec<String>> = users
                .iter()
                .map(|u| {
                    vec![
                        u.email.clone(),
                        u.name.clone(),
                        if u.is_admin() { "yes" } else { "" }.to_string(),
                    ]
                })
                .collect();
            print_table(&["EMAIL", "NAME", "ADMIN"], &rows, "No accounts found.");
        }
        OutputFormat::Json => {
            let views: Vec<AccountView<'_>> = users.iter().map(AccountView::from).collect();
            print_json(&views)?;
        }
    }
    Ok(())
}
