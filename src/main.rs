//! silt CLI - content-addressed object store command line interface

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use std::io::{self, Write};

use silt::{hash_file, ls_tree, read_object, store_file, Hash, ObjectKind, Repo};

#[derive(Parser)]
#[command(name = "silt")]
#[command(about = "git-compatible content-addressed object store")]
#[command(version)]
struct Cli {
    /// repository path
    #[arg(short, long, default_value = ".")]
    repo: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// initialize a new repository
    Init {
        /// path to create repository at
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// compute a blob digest from a file
    HashObject {
        /// file to hash
        file: PathBuf,

        /// write the object into the store
        #[arg(short, long)]
        write: bool,
    },

    /// show contents of an object
    CatFile {
        /// object digest (40 hex chars)
        object: String,

        /// print the object payload
        #[arg(short = 'p', long)]
        print: bool,

        /// print the object type
        #[arg(short = 't', long = "type")]
        show_type: bool,

        /// print the payload size in bytes
        #[arg(short = 's', long = "size")]
        show_size: bool,
    },

    /// list the contents of a tree object
    LsTree {
        /// tree digest (40 hex chars)
        tree: String,

        /// list only entry names
        #[arg(long)]
        name_only: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("error: {}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn run(cli: Cli) -> silt::Result<()> {
    match cli.command {
        Commands::Init { path } => {
            Repo::init(&path)?;
            println!(
                "initialized empty silt repository in {}",
                path.join(".git").display()
            );
        }

        Commands::HashObject { file, write } => {
            let hash = if write {
                let repo = Repo::open(&cli.repo)?;
                store_file(&repo, &file)?
            } else {
                hash_file(&file)?
            };
            println!("{}", hash);
        }

        Commands::CatFile {
            object,
            print,
            show_type,
            show_size,
        } => {
            let repo = Repo::open(&cli.repo)?;
            let hash = Hash::from_hex(&object)?;
            let (kind, payload) = read_object(&repo, &hash)?;

            if show_type {
                println!("{}", kind);
            } else if show_size {
                println!("{}", payload.len());
            } else if print {
                if kind == ObjectKind::Tree {
                    // raw tree payloads are binary; show structured entries
                    for entry in ls_tree(&repo, &hash)? {
                        println!("{}", entry);
                    }
                } else {
                    io::stdout().write_all(&payload).map_err(|e| silt::Error::Io {
                        path: "stdout".into(),
                        source: e,
                    })?;
                }
            }
        }

        Commands::LsTree { tree, name_only } => {
            let repo = Repo::open(&cli.repo)?;
            let hash = Hash::from_hex(&tree)?;

            for entry in ls_tree(&repo, &hash)? {
                if name_only {
                    println!("{}", String::from_utf8_lossy(&entry.name));
                } else {
                    println!("{}", entry);
                }
            }
        }
    }

    Ok(())
}
