use clap::{App, Arg, ArgGroup};
use colored::Colorize;
use std::path::PathBuf;
use tpl::{
    cmd,
    config::Config,
    store::TemplateStore,
    userpath::{to_user_dir, to_user_path, UserPath},
    verbosity::Verbosity,
};

const VERBOSITY_ARG: &str = "v";
const CONFIG_DIR_ARG: &str = "config_dir";
const ADD_ARG: &str = "add";
const NAME_ARG: &str = "name";
const UPDATE_ARG: &str = "update";
const DELETE_ARG: &str = "delete";
const LIST_ARG: &str = "list";
const OVERWRITE_ARG: &str = "overwrite";
const ARGS_ARG: &str = "ARGS";

/// Gets the default directory for tpl's configuration files,
/// namely `(default config directory)/tpl`, where the default
/// configuration directory is given by the `dirs` crate.
///
/// As a side effect of this function, **if the default directory
/// does not exist, it will be created**.
fn default_config_dir() -> Result<PathBuf, String> {
    let default_dir = dirs::config_dir()
        .ok_or("`dirs` crate does not specify a config directory for this OS.")?
        .join("tpl");
    if !default_dir.exists() {
        std::fs::create_dir_all(&default_dir).map_err(|e| {
            format!(
                "Failed to create the default configuration directory ('{}'): {}",
                default_dir.to_string_lossy(),
                e
            )
        })?;
    }
    Ok(default_dir)
}

fn exit_with(message: &str, code: i32) -> ! {
    eprintln!("{}", message.red());
    std::process::exit(code)
}

fn user_path_or_exit(path: &str) -> UserPath {
    to_user_path(path).unwrap_or_else(|err| exit_with(&err, exitcode::USAGE))
}

fn app() -> App<'static, 'static> {
    App::new("tpl")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Manage and copy templates of files and directories.")
        .long_about(
            "Manage and copy templates of files and directories.\n\n\
            With no action flag, `tpl TEMPLATE DESTINATION` copies \
            TEMPLATE to DESTINATION.",
        )
        .arg(
            Arg::with_name(VERBOSITY_ARG)
                .short("v")
                .multiple(true)
                .help("Sets the level of verbosity"),
        )
        .arg(
            Arg::with_name(CONFIG_DIR_ARG)
                .long("config-dir")
                .hidden(true)
                .takes_value(true)
                .env("TPL_CONFIG")
                .validator(|dir_str| {
                    to_user_dir(&dir_str).map(|_| ()).map_err(|_| {
                        format!(
                            "The specified configuration directory (\"{}\") does not exist.",
                            &dir_str
                        )
                    })
                }),
        )
        .arg(
            Arg::with_name(ADD_ARG)
                .short("a")
                .long("add")
                .value_name("SRC")
                .takes_value(true)
                .help("Add a template")
                .long_help(
                    "Add the file or directory SRC as a template. Any ARGS \
                    are joined into the template's description.",
                ),
        )
        .arg(
            Arg::with_name(NAME_ARG)
                .short("n")
                .long("name")
                .value_name("NAME")
                .takes_value(true)
                .requires(ADD_ARG)
                .help("Name of the template to add")
                .long_help(
                    "Name of the template to add. Defaults to the last \
                    segment of SRC.",
                ),
        )
        .arg(
            Arg::with_name(UPDATE_ARG)
                .short("u")
                .long("update")
                .value_name("TEMPLATE")
                .takes_value(true)
                .help("Update a template's description (given as ARGS)"),
        )
        .arg(
            Arg::with_name(DELETE_ARG)
                .short("d")
                .long("delete")
                .alias("remove")
                .value_name("TEMPLATE")
                .takes_value(true)
                .help("Template to delete"),
        )
        .arg(
            Arg::with_name(LIST_ARG)
                .short("l")
                .long("list")
                .help("List templates"),
        )
        .arg(
            Arg::with_name(OVERWRITE_ARG)
                .short("o")
                .long("overwrite")
                .help("Allow overwriting"),
        )
        .arg(
            Arg::with_name(ARGS_ARG)
                .multiple(true)
                .help("TEMPLATE DESTINATION to copy, or a description"),
        )
        .group(ArgGroup::with_name("action").args(&[ADD_ARG, UPDATE_ARG, DELETE_ARG, LIST_ARG]))
}

fn main() {
    let app = app();
    let matches = app.clone().get_matches();

    Verbosity::from(matches.occurrences_of(VERBOSITY_ARG)).init_logger();

    let args: Vec<&str> = matches
        .values_of(ARGS_ARG)
        .map(|values| values.collect())
        .unwrap_or_default();
    let description = args.join(" ");
    let overwrite = matches.is_present(OVERWRITE_ARG);

    let has_action = [ADD_ARG, UPDATE_ARG, DELETE_ARG, LIST_ARG]
        .iter()
        .any(|arg| matches.is_present(arg));
    if !has_action && args.len() != 2 {
        app.write_help(&mut std::io::stderr()).ok();
        eprintln!();
        std::process::exit(exitcode::USAGE);
    }

    let config_dir = match matches.value_of(CONFIG_DIR_ARG) {
        Some(user_path) => to_user_dir(user_path).map(|dir| dir.path_buf),
        None => default_config_dir(),
    }
    .unwrap_or_else(|err| exit_with(&err, exitcode::CONFIG));
    log::debug!("Using configuration directory {}", config_dir.display());

    let config = Config::load_or_init(&config_dir)
        .unwrap_or_else(|err| exit_with(&err.to_string(), exitcode::CONFIG));
    let store = TemplateStore::new(&config);

    let result = if matches.is_present(LIST_ARG) {
        cmd::list::list(&store)
    } else if let Some(src) = matches.value_of(ADD_ARG) {
        cmd::add::add(
            &store,
            &user_path_or_exit(src),
            matches.value_of(NAME_ARG),
            &description,
            overwrite,
        )
    } else if let Some(name) = matches.value_of(UPDATE_ARG) {
        cmd::update::update(&store, name, &description)
    } else if let Some(name) = matches.value_of(DELETE_ARG) {
        cmd::delete::delete(&store, name)
    } else {
        cmd::copy::copy(&store, args[0], &user_path_or_exit(args[1]), overwrite)
    };

    if let Err(err) = result {
        cmd::fail(err);
    }
}
