use clap::{App, Arg};
use std::process::exit;
use vdfs_tool_lib::confirm;

fn main() {
    let arguments = App::new("die-vdfs")
        .version("0.1.0")
        .about("This program deletes a vdfs image from the host.")
        .arg(
            Arg::with_name("image")
                .required(true)
                .takes_value(true)
                .help("The path of the image"),
        )
        .arg(
            Arg::with_name("force")
                .short("f")
                .long("force")
                .required(false)
                .takes_value(false)
                .help("Delete without asking for confirmation."),
        )
        .get_matches();

    let path = match arguments.value_of("image") {
        Some(p) => p,
        None => {
            eprintln!("An image is required.");
            exit(1);
        }
    };

    if !arguments.is_present("force") {
        if !confirm(&format!("Are you sure you wish to delete \"{}\"?", path)) {
            println!("Will not delete image.");
            exit(0);
        }
    }

    match std::fs::remove_file(path) {
        Ok(_) => (),
        Err(e) => {
            eprintln!("Failed to delete image: {}", e);
            exit(1);
        }
    }

    println!("Deleted \"{}\".", path);
}
