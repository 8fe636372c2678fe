use clap::{App, AppSettings, Arg, ArgMatches};
use cmd::OrExit;
use projman::{scene::SCENE_FILE_TYPES, LoadedConfig, Paths, ProjectRegistry, TemplateStore};
use verbosity::Verbosity;

mod cmd;
mod userbool;
mod userpath;
mod verbosity;

const DATA_DIR_ARG: &str = "data_dir";

fn validate_dir(arg_str: String) -> Result<(), String> {
    userpath::to_user_path(&arg_str).map(|_| ())
}

fn validate_new_path(arg_str: String) -> Result<(), String> {
    userpath::to_new_path(&arg_str).map(|_| ())
}

/// Values of an argument validated with `validate_dir`.
fn user_dir(matches: &ArgMatches, arg: &str) -> Option<userpath::UserDir> {
    matches
        .value_of(arg)
        .map(|p| userpath::to_user_path(p).unwrap_or_else(|e| usage_error(&e)))
}

fn new_path(matches: &ArgMatches, arg: &str) -> std::path::PathBuf {
    let value = matches.value_of(arg).unwrap_or(".");
    userpath::to_new_path(value).unwrap_or_else(|e| usage_error(&e))
}

fn usage_error(message: &str) -> ! {
    clap::Error::with_description(message, clap::ErrorKind::InvalidValue).exit()
}

fn main() {
    let type_keys: Vec<&str> = SCENE_FILE_TYPES.iter().map(|t| t.key).collect();

    let matches = App::new("projman")
        .version(projman::VERSION)
        .about("Keep track of 3D projects, scaffold them from folder templates and find their scenes.")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("v")
                .short("v")
                .multiple(true)
                .help("Sets the level of verbosity")
                .global(true),
        )
        .arg(
            Arg::with_name(DATA_DIR_ARG)
                .long("data-dir")
                .takes_value(true)
                .hidden(true)
                .global(true)
                .env("PROJMAN_DATA")
                .validator(validate_new_path),
        )
        .subcommand(App::new(cmd::list::CMD_STR).about("Lists the known projects."))
        .subcommand(
            App::new(cmd::add::CMD_STR)
                .about("Adds an existing project folder to the list.")
                .arg(
                    Arg::with_name(cmd::add::PATH_ARG)
                        .help("The project folder")
                        .long_help(
                            "The project folder. If it has no .luxproject file, \
                            one is written so the host treats it as a project.",
                        )
                        .required(true)
                        .validator(validate_dir),
                ),
        )
        .subcommand(
            App::new(cmd::remove::CMD_STR)
                .about("Removes a project from the list, leaving its folder alone.")
                .arg(
                    Arg::with_name(cmd::remove::PATH_ARG)
                        .help("The project path, exactly as `list` shows it")
                        .required(true),
                )
                .arg(
                    Arg::with_name(cmd::remove::YES_ARG)
                        .short("y")
                        .long("yes")
                        .help("Do not ask for confirmation"),
                ),
        )
        .subcommand(
            App::new(cmd::new::CMD_STR)
                .about("Creates a new project.")
                .arg(
                    Arg::with_name(cmd::new::PATH_ARG)
                        .help("Where to create the project")
                        .long_help(
                            "Where to create the project. The folder is created if \
                            needed; a .luxproject file is written in it and it is \
                            added to the project list.",
                        )
                        .required(true)
                        .validator(validate_new_path),
                )
                .arg(
                    Arg::with_name(cmd::new::TEMPLATE_ARG)
                        .short("t")
                        .long("template")
                        .takes_value(true)
                        .help("A folder template to lay out inside the project"),
                ),
        )
        .subcommand(
            App::new(cmd::transfer::EXPORT_CMD_STR)
                .about("Writes the project list to a file.")
                .arg(
                    Arg::with_name(cmd::transfer::FILE_ARG)
                        .required(true)
                        .validator(validate_new_path),
                ),
        )
        .subcommand(
            App::new(cmd::transfer::IMPORT_CMD_STR)
                .about("Adds every project listed in a file.")
                .arg(Arg::with_name(cmd::transfer::FILE_ARG).required(true)),
        )
        .subcommand(
            App::new(cmd::scenes::CMD_STR)
                .about("Lists the scene files in a project.")
                .arg(
                    Arg::with_name(cmd::scenes::PROJECT_ARG)
                        .help("The project folder")
                        .required(true)
                        .validator(validate_dir),
                )
                .arg(
                    Arg::with_name(cmd::scenes::TYPE_ARG)
                        .short("t")
                        .long("type")
                        .takes_value(true)
                        .multiple(true)
                        .number_of_values(1)
                        .possible_values(&type_keys)
                        .help("Scene type to look for, instead of the saved filters"),
                ),
        )
        .subcommand(
            App::new(cmd::filters::CMD_STR)
                .about("Shows or selects the scene types `scenes` looks for.")
                .arg(
                    Arg::with_name(cmd::filters::TYPE_ARG)
                        .multiple(true)
                        .possible_values(&type_keys)
                        .help("Scene types to select, replacing the current selection"),
                )
                .arg(
                    Arg::with_name(cmd::filters::CLEAR_ARG)
                        .long("clear")
                        .conflicts_with(cmd::filters::TYPE_ARG)
                        .help("Deselect every type"),
                ),
        )
        .subcommand(App::new(cmd::templates::CMD_STR).about("Lists the folder templates."))
        .subcommand(
            App::new(cmd::tree::CMD_STR)
                .about("Shows the folders of a template.")
                .arg(Arg::with_name(cmd::tree::TEMPLATE_ARG).required(true)),
        )
        .subcommand(
            App::new(cmd::make::CMD_STR)
                .about("Creates a new folder template.")
                .arg(Arg::with_name(cmd::make::NAME_ARG).required(true))
                .arg(
                    Arg::with_name(cmd::make::FOLDER_ARG)
                        .multiple(true)
                        .help("Folders to include, e.g. Textures/Raw"),
                )
                .arg(
                    Arg::with_name(cmd::make::FROM_ARG)
                        .long("from")
                        .takes_value(true)
                        .validator(validate_dir)
                        .help("Copy the folder layout of an existing directory"),
                ),
        )
        .subcommand(
            App::new(cmd::edit::CMD_STR)
                .about("Changes the folders of a template.")
                .long_about(
                    "Changes the folders of a template. Removals are applied \
                    first, then renames, then additions; folders are sorted \
                    by name before saving.",
                )
                .arg(Arg::with_name(cmd::edit::TEMPLATE_ARG).required(true))
                .arg(
                    Arg::with_name(cmd::edit::ADD_ARG)
                        .long("add")
                        .takes_value(true)
                        .multiple(true)
                        .number_of_values(1)
                        .value_name("PATH"),
                )
                .arg(
                    Arg::with_name(cmd::edit::REMOVE_ARG)
                        .long("remove")
                        .takes_value(true)
                        .multiple(true)
                        .number_of_values(1)
                        .value_name("PATH"),
                )
                .arg(
                    Arg::with_name(cmd::edit::RENAME_ARG)
                        .long("rename")
                        .takes_value(true)
                        .multiple(true)
                        .number_of_values(2)
                        .value_names(&["PATH", "NEW_NAME"]),
                ),
        )
        .get_matches();

    let (sub_name, sub_matches) = matches.subcommand();
    let verbosity = Verbosity::from(
        matches
            .occurrences_of("v")
            .max(sub_matches.map_or(0, |m| m.occurrences_of("v"))),
    );
    verbosity::init_logging(&verbosity);

    let data_dir = sub_matches
        .and_then(|m| m.value_of(DATA_DIR_ARG))
        .or_else(|| matches.value_of(DATA_DIR_ARG))
        .map(|dir| userpath::to_new_path(dir).unwrap_or_else(|e| usage_error(&e)))
        .or_else(Paths::default_data_dir)
        .unwrap_or_else(|| {
            usage_error("No data directory is known for this OS; set PROJMAN_DATA.")
        });
    let paths = Paths::create(data_dir).or_exit();

    let mut config = match LoadedConfig::load_config(&paths) {
        Ok(config) => config,
        Err(err) => usage_error(&err.to_string()),
    };
    let registry = ProjectRegistry::new(&paths);
    let store = TemplateStore::new(&paths);

    let sub_matches = match sub_matches {
        Some(sub_matches) => sub_matches,
        None => usage_error("A subcommand is required."),
    };
    let values = |arg: &str| sub_matches.values_of(arg).map(|v| v.collect::<Vec<_>>());

    let result = match sub_name {
        cmd::list::CMD_STR => cmd::list::list(&registry),
        cmd::add::CMD_STR => match user_dir(sub_matches, cmd::add::PATH_ARG) {
            Some(dir) => cmd::add::add(&registry, dir),
            None => usage_error("A project folder is required."),
        },
        cmd::remove::CMD_STR => cmd::remove::remove(
            &registry,
            sub_matches.value_of(cmd::remove::PATH_ARG).unwrap_or_default(),
            sub_matches.is_present(cmd::remove::YES_ARG),
        ),
        cmd::new::CMD_STR => cmd::new::new(
            &registry,
            &store,
            &new_path(sub_matches, cmd::new::PATH_ARG),
            sub_matches.value_of(cmd::new::TEMPLATE_ARG),
        ),
        cmd::transfer::EXPORT_CMD_STR => {
            cmd::transfer::export(&registry, &new_path(sub_matches, cmd::transfer::FILE_ARG))
        }
        cmd::transfer::IMPORT_CMD_STR => {
            cmd::transfer::import(&registry, &new_path(sub_matches, cmd::transfer::FILE_ARG))
        }
        cmd::scenes::CMD_STR => match user_dir(sub_matches, cmd::scenes::PROJECT_ARG) {
            Some(project) => {
                cmd::scenes::scenes(&config, project, values(cmd::scenes::TYPE_ARG))
            }
            None => usage_error("A project folder is required."),
        },
        cmd::filters::CMD_STR => {
            cmd::filters::filters(
                &mut config,
                values(cmd::filters::TYPE_ARG),
                sub_matches.is_present(cmd::filters::CLEAR_ARG),
            );
            Ok(())
        }
        cmd::templates::CMD_STR => cmd::templates::templates(&store),
        cmd::tree::CMD_STR => cmd::tree::tree(
            &store,
            sub_matches.value_of(cmd::tree::TEMPLATE_ARG).unwrap_or_default(),
        ),
        cmd::make::CMD_STR => cmd::make::make(
            &store,
            sub_matches.value_of(cmd::make::NAME_ARG).unwrap_or_default(),
            values(cmd::make::FOLDER_ARG).unwrap_or_default(),
            user_dir(sub_matches, cmd::make::FROM_ARG),
        ),
        cmd::edit::CMD_STR => {
            let renames = values(cmd::edit::RENAME_ARG).unwrap_or_default();
            let edits = cmd::edit::Edits {
                add: values(cmd::edit::ADD_ARG).unwrap_or_default(),
                remove: values(cmd::edit::REMOVE_ARG).unwrap_or_default(),
                rename: renames.chunks(2).map(|pair| (pair[0], pair[1])).collect(),
            };
            cmd::edit::edit(
                &store,
                sub_matches.value_of(cmd::edit::TEMPLATE_ARG).unwrap_or_default(),
                edits,
            )
        }
        name => panic!("Unimplemented subcommand {}", name),
    };
    result.or_exit()
}
