use crate::error::{AppError, CliError};
use crate::utils::validation::{api_base_url, validate_url};
use rpassword::read_password;
use std::io::{self, Write};

/// User login credentials input handler
pub struct LoginInput {
    pub url: String,
    pub email: String,
    pub password: String,
}

impl LoginInput {
    /// Collect login credentials, prompting for anything not supplied on
    /// the command line. The password prompt never echoes.
    pub fn collect(
        url: Option<String>,
        email: Option<String>,
        password: Option<String>,
    ) -> Result<Self, AppError> {
        let url = match url {
            Some(url) => url,
            None => prompt_line("Docmost URL: ")?,
        };
        let email = match email {
            Some(email) => email,
            None => prompt_line("Email: ")?,
        };
        let password = match password {
            Some(password) => password,
            None => {
                print!("Password: ");
                io::stdout()
                    .flush()
                    .map_err(|source| CliError::Input { source })?;
                read_password()
                    .map_err(|source| CliError::Input { source })?
                    .trim()
                    .to_string()
            }
        };

        Ok(Self {
            url,
            email,
            password,
        })
    }

    /// Validate that the URL is usable and credentials are not empty
    pub fn validate(&self) -> Result<(), AppError> {
        validate_url(&self.url)?;
        if self.email.is_empty() {
            return Err(CliError::InvalidArguments("Email cannot be empty".to_string()).into());
        }
        if self.password.is_empty() {
            return Err(CliError::InvalidArguments("Password cannot be empty".to_string()).into());
        }
        Ok(())
    }

    /// Instance URL with the `/api` suffix ensured, ready for the login
    /// endpoint.
    pub fn api_url(&self) -> String {
        api_base_url(&self.url)
    }
}

/// Ask a yes/no question, defaulting to no.
pub fn confirm(prompt: &str) -> Result<bool, AppError> {
    print!("{} [y/N]: ", prompt);
    io::stdout()
        .flush()
        .map_err(|source| CliError::Input { source })?;

    let mut answer = String::new();
    io::stdin()
        .read_line(&mut answer)
        .map_err(|source| CliError::Input { source })?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn prompt_line(prompt: &str) -> Result<String, AppError> {
    print!("{}", prompt);
    io::stdout()
        .flush()
        .map_err(|source| CliError::Input { source })?;

    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .map_err(|source| CliError::Input { source })?;
    Ok(line.trim().to_string())
}
