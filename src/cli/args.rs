//! Command-line argument parsing for devhub.

use crate::board::SortKey;
use crate::model::EntityId;
use std::env;
use std::path::PathBuf;
use std::process;

/// Command-line interface commands
#[derive(Debug)]
pub enum Command {
    Name {
        display_name: String,
    },
    Send {
        text: String,
    },
    Chat {
        query: Option<String>,
    },
    Post {
        title: String,
        description: Option<String>,
        code_file: Option<PathBuf>,
        language: Option<String>,
        subject: Option<String>,
        image_file: Option<PathBuf>,
    },
    Posts {
        subject: Option<String>,
        query: Option<String>,
        sort: SortKey,
    },
    Subjects,
    Show {
        post_id: EntityId,
    },
    Comment {
        post_id: EntityId,
        text: String,
    },
    Edit {
        post_id: EntityId,
        title: Option<String>,
        description: Option<String>,
        code_file: Option<PathBuf>,
        language: Option<String>,
        subject: Option<String>,
        image_file: Option<PathBuf>,
    },
    Favorite {
        post_id: EntityId,
    },
    DeleteMessage {
        id: EntityId,
    },
    DeletePost {
        id: EntityId,
    },
    DeleteComment {
        id: EntityId,
    },
}

/// Parse command line arguments into a Command
pub fn parse_args() -> Command {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    match args[1].as_str() {
        "name" => {
            if args.len() < 3 {
                eprintln!("Error: name requires a display name");
                eprintln!("Usage: devhub name <display_name>");
                process::exit(1);
            }
            Command::Name {
                display_name: args[2].clone(),
            }
        }

        "send" => {
            if args.len() < 3 {
                eprintln!("Error: send requires message text");
                eprintln!("Usage: devhub send <text>");
                process::exit(1);
            }
            Command::Send {
                text: args[2..].join(" "),
            }
        }

        "chat" => Command::Chat {
            query: args.get(2).cloned(),
        },

        "post" => {
            if args.len() < 3 {
                eprintln!("Error: post requires a title");
                eprintln!(
                    "Usage: devhub post <title> [--description <text>] [--code <file>] \
                     [--language <lang>] [--subject <label>] [--image <file>]"
                );
                process::exit(1);
            }
            let fields = parse_post_fields(&args[3..]);
            Command::Post {
                title: args[2].clone(),
                description: fields.description,
                code_file: fields.code_file,
                language: fields.language,
                subject: fields.subject,
                image_file: fields.image_file,
            }
        }

        "posts" => {
            let mut subject = None;
            let mut query = None;
            let mut sort = SortKey::Latest;
            let mut i = 2;
            while i < args.len() {
                match args[i].as_str() {
                    "--subject" => {
                        subject = Some(expect_value(&args, i, "--subject"));
                        i += 2;
                    }
                    "--search" => {
                        query = Some(expect_value(&args, i, "--search"));
                        i += 2;
                    }
                    "--sort" => {
                        sort = parse_sort_key(&expect_value(&args, i, "--sort"));
                        i += 2;
                    }
                    other => {
                        eprintln!("Error: Unknown option '{}'", other);
                        process::exit(1);
                    }
                }
            }
            Command::Posts {
                subject,
                query,
                sort,
            }
        }

        "subjects" => Command::Subjects,

        "show" => {
            if args.len() < 3 {
                eprintln!("Error: show requires a post id");
                process::exit(1);
            }
            Command::Show {
                post_id: EntityId::from(args[2].as_str()),
            }
        }

        "comment" => {
            if args.len() < 4 {
                eprintln!("Error: comment requires a post id and text");
                eprintln!("Usage: devhub comment <post_id> <text>");
                process::exit(1);
            }
            Command::Comment {
                post_id: EntityId::from(args[2].as_str()),
                text: args[3..].join(" "),
            }
        }

        "edit" => {
            if args.len() < 3 {
                eprintln!("Error: edit requires a post id");
                eprintln!(
                    "Usage: devhub edit <post_id> [--title <title>] [--description <text>] \
                     [--code <file>] [--language <lang>] [--subject <label>] [--image <file>]"
                );
                process::exit(1);
            }
            let fields = parse_post_fields(&args[3..]);
            Command::Edit {
                post_id: EntityId::from(args[2].as_str()),
                title: fields.title,
                description: fields.description,
                code_file: fields.code_file,
                language: fields.language,
                subject: fields.subject,
                image_file: fields.image_file,
            }
        }

        "favorite" => {
            if args.len() < 3 {
                eprintln!("Error: favorite requires a post id");
                process::exit(1);
            }
            Command::Favorite {
                post_id: EntityId::from(args[2].as_str()),
            }
        }

        "delete-message" => Command::DeleteMessage {
            id: expect_id(&args, "delete-message"),
        },

        "delete-post" => Command::DeletePost {
            id: expect_id(&args, "delete-post"),
        },

        "delete-comment" => Command::DeleteComment {
            id: expect_id(&args, "delete-comment"),
        },

        _ => {
            eprintln!("Error: Unknown command '{}'", args[1]);
            print_usage();
            process::exit(1);
        }
    }
}

#[derive(Debug, Default)]
struct PostFields {
    title: Option<String>,
    description: Option<String>,
    code_file: Option<PathBuf>,
    language: Option<String>,
    subject: Option<String>,
    image_file: Option<PathBuf>,
}

fn parse_post_fields(args: &[String]) -> PostFields {
    let mut fields = PostFields::default();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--title" => {
                fields.title = Some(expect_value(args, i, "--title"));
                i += 2;
            }
            "--description" => {
                fields.description = Some(expect_value(args, i, "--description"));
                i += 2;
            }
            "--code" => {
                fields.code_file = Some(PathBuf::from(expect_value(args, i, "--code")));
                i += 2;
            }
            "--language" => {
                fields.language = Some(expect_value(args, i, "--language"));
                i += 2;
            }
            "--subject" => {
                fields.subject = Some(expect_value(args, i, "--subject"));
                i += 2;
            }
            "--image" => {
                fields.image_file = Some(PathBuf::from(expect_value(args, i, "--image")));
                i += 2;
            }
            other => {
                eprintln!("Error: Unknown option '{}'", other);
                process::exit(1);
            }
        }
    }
    fields
}

fn expect_value(args: &[String], i: usize, option: &str) -> String {
    match args.get(i + 1) {
        Some(value) => value.clone(),
        None => {
            eprintln!("Error: {} requires a value", option);
            process::exit(1);
        }
    }
}

fn expect_id(args: &[String], command: &str) -> EntityId {
    match args.get(2) {
        Some(id) => EntityId::from(id.as_str()),
        None => {
            eprintln!("Error: {} requires an id", command);
            process::exit(1);
        }
    }
}

fn parse_sort_key(value: &str) -> SortKey {
    match value {
        "latest" => SortKey::Latest,
        "oldest" => SortKey::Oldest,
        "az" => SortKey::Alphabetical,
        other => {
            eprintln!("Error: Unknown sort key '{}'", other);
            eprintln!("Supported sort keys: latest, oldest, az");
            process::exit(1);
        }
    }
}

/// Print usage information
pub fn print_usage() {
    println!("devhub - local developer hub");
    println!("============================");
    println!();
    println!("Usage: devhub <command> [args...]");
    println!();
    println!("Commands:");
    println!("  name <display_name>                     Set the display name");
    println!("  send <text>                             Post a chat message");
    println!("  chat [query]                            Show the chatroom feed");
    println!("  post <title> [options]                  Create a code post");
    println!("  posts [--subject <s>] [--search <q>] [--sort <k>]");
    println!("                                          Browse the coderoom board");
    println!("  subjects                                List subject labels");
    println!("  show <post_id>                          Show one post with comments");
    println!("  comment <post_id> <text>                Comment on a post");
    println!("  edit <post_id> [options]                Edit a post in place");
    println!("  favorite <post_id>                      Toggle a post's favorite star");
    println!("  delete-message <id>                     Delete a chat message");
    println!("  delete-post <id>                        Delete a post and its comments");
    println!("  delete-comment <id>                     Delete a comment");
    println!();
    println!("Post options:");
    println!("  --description <text>   Free-text description");
    println!("  --code <file>          Read the code snippet from a file");
    println!("  --language <lang>      Language tag (defaults to 'text')");
    println!("  --subject <label>      Subject label (defaults to 'General')");
    println!("  --image <file>         Attach an image file");
    println!("  --title <title>        New title (edit only)");
    println!();
    println!("Sort keys: latest (default), oldest, az");
    println!();
    println!("Examples:");
    println!("  devhub send 'anyone around?'");
    println!("  devhub post 'Binary search' --code search.rs --language rust --subject Algorithms");
    println!("  devhub posts --subject Favorites --sort az");
    println!("  devhub comment post_1700000000000_1 'nice trick'");
}
