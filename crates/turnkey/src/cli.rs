use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use turnkey_core::lifecycle::Lifecycle;
use turnkey_core::settings::Settings;

/// Output format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format
    Text,
    /// JSON structured format
    Json,
}

/// Log format options
#[derive(Debug, Clone, ValueEnum)]
pub enum LogFormat {
    /// Human-readable text format
    Text,
    /// JSON structured format
    Json,
}

/// Log level options
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    /// Error messages only
    Error,
    /// Warning and error messages
    Warn,
    /// Informational messages and above
    Info,
    /// Debug messages and above
    Debug,
    /// All messages including trace
    Trace,
}

/// Deployment orchestrator subcommands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Deploy a template as a named project
    ///
    /// The template's files are staged into a fresh workspace and
    /// `appjail-director up` runs from inside it. Edited file contents can
    /// be supplied to override the template defaults without changing the
    /// template itself.
    Deploy {
        /// Template to deploy (display name or directory name)
        template: String,
        /// Project name (defaults to the template's directory name)
        #[arg(long)]
        project: Option<String>,
        /// Read the director composition file from this path instead
        #[arg(long, value_name = "PATH")]
        director_file: Option<PathBuf>,
        /// Read the environment file from this path instead
        #[arg(long, value_name = "PATH")]
        env_file: Option<PathBuf>,
        /// Read an extra config file from a path (format: NAME=PATH, can be repeated)
        #[arg(long = "extra", value_name = "NAME=PATH", action = clap::ArgAction::Append)]
        extras: Vec<String>,
    },

    /// Start a deployed project
    Start {
        /// Project name
        project: String,
    },

    /// Stop a running project
    Stop {
        /// Project name
        project: String,
    },

    /// Tear down a project, keeping its workspace on disk
    Destroy {
        /// Project name
        project: String,
    },

    /// Tear down a project and remove its workspace
    Rm {
        /// Project name
        project: String,
    },

    /// Show the status of all tracked projects
    Status {
        /// Output format (text or json)
        #[arg(long, value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Print the most recent deploy logs of a project
    Logs {
        /// Project name
        project: String,
    },

    /// Template management commands
    Templates {
        /// Template subcommand
        #[command(subcommand)]
        command: TemplateCommands,
    },

    /// Jail management commands
    Jails {
        /// Jail subcommand
        #[command(subcommand)]
        command: JailCommands,
    },
}

/// Template management subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum TemplateCommands {
    /// List available templates
    List {
        /// Output format (text or json)
        #[arg(long, value_enum, default_value = "text")]
        output: OutputFormat,
    },
    /// Remove a template directory
    Rm {
        /// Template to remove (display name or directory name)
        template: String,
    },
    /// Save edited file contents back into a template
    Save {
        /// Template to edit (display name or directory name)
        template: String,
        /// Read the director composition file from this path
        #[arg(long, value_name = "PATH")]
        director_file: Option<PathBuf>,
        /// Read the environment file from this path
        #[arg(long, value_name = "PATH")]
        env_file: Option<PathBuf>,
        /// Read an extra config file from a path (format: NAME=PATH, can be repeated)
        #[arg(long = "extra", value_name = "NAME=PATH", action = clap::ArgAction::Append)]
        extras: Vec<String>,
    },
}

/// Jail management subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum JailCommands {
    /// List jails with selected attributes
    List {
        /// Attribute keywords to display (can be repeated)
        #[arg(long, value_name = "KEYWORD", action = clap::ArgAction::Append)]
        keyword: Vec<String>,
        /// Output format (text or json)
        #[arg(long, value_enum, default_value = "text")]
        output: OutputFormat,
    },
    /// Start a jail
    Start {
        /// Jail name
        jail: String,
    },
    /// Stop a jail
    Stop {
        /// Jail name
        jail: String,
    },
    /// Restart a jail
    Restart {
        /// Jail name
        jail: String,
    },
    /// Destroy a jail, recursively and by force
    Destroy {
        /// Jail name
        jail: String,
    },
    /// Report whether a jail is running
    Status {
        /// Jail name
        jail: String,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = env!("CARGO_PKG_NAME"),
    version,
    about = "AppJail deployment orchestrator",
    long_about = "AppJail deployment orchestrator\n\nDeploys application templates as AppJail Director projects and manages their lifecycle.",
    color = clap::ColorChoice::Auto
)]
pub struct Cli {
    /// Log format (text or json, defaults to text, can be set via TURNKEY_LOG_FORMAT env var)
    #[arg(long, global = true, value_enum)]
    pub log_format: Option<LogFormat>,

    /// Log level
    #[arg(long, global = true, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Root directory of application templates
    #[arg(long, global = true, value_name = "PATH")]
    pub projects_dir: Option<PathBuf>,

    /// Root directory of deployed workspaces
    #[arg(long, global = true, value_name = "PATH")]
    pub workspaces_dir: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Initialize logging, verify external binaries, and run the subcommand
    pub async fn dispatch(self) -> Result<()> {
        // Initialize logging based on global options
        let log_format = match self.log_format {
            Some(LogFormat::Text) => Some("text"),
            Some(LogFormat::Json) => Some("json"),
            None => None, // Let logging module check environment variable
        };

        let log_level = match self.log_level {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        };

        // Set environment variable for log level before initializing logging
        if std::env::var_os("TURNKEY_LOG").is_none() && std::env::var_os("RUST_LOG").is_none() {
            std::env::set_var(
                "RUST_LOG",
                format!("turnkey={},turnkey_core={}", log_level, log_level),
            );
        }
        turnkey_core::logging::init(log_format)?;

        tracing::debug!("CLI initialized with log level: {}", log_level);

        // Every subcommand shells out, so check the binaries up front
        turnkey_core::preflight::require_programs()?;

        let settings = Settings::new(self.projects_dir, self.workspaces_dir)?;
        let lifecycle = Lifecycle::new(settings);

        match self.command {
            Commands::Deploy {
                template,
                project,
                director_file,
                env_file,
                extras,
            } => {
                use crate::commands::deploy::{execute_deploy, DeployArgs};

                let args = DeployArgs {
                    template,
                    project,
                    overrides: crate::commands::shared::FileOverrides {
                        director_file,
                        env_file,
                        extras,
                    },
                };
                execute_deploy(&lifecycle, args).await
            }
            Commands::Start { project } => {
                crate::commands::lifecycle::execute_start(&lifecycle, &project).await
            }
            Commands::Stop { project } => {
                crate::commands::lifecycle::execute_stop(&lifecycle, &project).await
            }
            Commands::Destroy { project } => {
                crate::commands::lifecycle::execute_destroy(&lifecycle, &project).await
            }
            Commands::Rm { project } => {
                crate::commands::lifecycle::execute_rm(&lifecycle, &project).await
            }
            Commands::Status { output } => {
                crate::commands::status::execute_status(&lifecycle, output).await
            }
            Commands::Logs { project } => crate::commands::logs::execute_logs(&project).await,
            Commands::Templates { command } => match command {
                TemplateCommands::List { output } => {
                    crate::commands::templates::execute_list(lifecycle.settings(), output)
                }
                TemplateCommands::Rm { template } => {
                    crate::commands::templates::execute_rm(lifecycle.settings(), &template)
                }
                TemplateCommands::Save {
                    template,
                    director_file,
                    env_file,
                    extras,
                } => {
                    use crate::commands::templates::{execute_save, SaveArgs};

                    let args = SaveArgs {
                        template,
                        overrides: crate::commands::shared::FileOverrides {
                            director_file,
                            env_file,
                            extras,
                        },
                    };
                    execute_save(lifecycle.settings(), args)
                }
            },
            Commands::Jails { command } => crate::commands::jails::execute(command).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_deploy_parses_overrides() {
        let cli = Cli::parse_from([
            "turnkey",
            "deploy",
            "web-server",
            "--project",
            "www",
            "--extra",
            "nginx=/tmp/nginx.conf",
            "--extra",
            "motd=/tmp/motd",
        ]);
        match cli.command {
            Commands::Deploy {
                template,
                project,
                extras,
                ..
            } => {
                assert_eq!(template, "web-server");
                assert_eq!(project.as_deref(), Some("www"));
                assert_eq!(extras, vec!["nginx=/tmp/nginx.conf", "motd=/tmp/motd"]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["turnkey", "status", "--projects-dir", "/tmp/p"]);
        assert_eq!(cli.projects_dir, Some(PathBuf::from("/tmp/p")));
    }
}
