use clap::{App, Arg};
use std::process::exit;
use vdfs::{Disk, DiskInfo};
use vdfs_tool_lib::{format_usage, u64_to_sized_string, FileImage};

fn main() {
    let arguments = App::new("mem-vdfs")
        .version("0.1.0")
        .about("This program shows block usage of a vdfs image.")
        .arg(
            Arg::with_name("image")
                .required(true)
                .takes_value(true)
                .help("The path of the image"),
        )
        .get_matches();

    let path = match arguments.value_of("image") {
        Some(p) => p,
        None => {
            eprintln!("An image is required.");
            exit(1);
        }
    };

    let mut handler = match FileImage::new(path.to_string()) {
        Ok(h) => h,
        Err(e) => {
            eprintln!("{}", e);
            exit(1);
        }
    };

    let disk = match Disk::open(&mut handler) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Disk opening error: {}", e);
            exit(1);
        }
    };

    let info = DiskInfo::from_disk(&disk);

    println!(
        "{}",
        format_usage(&disk.usage(), info.block_count() as usize)
    );
    println!(
        "{} files, {} free slots",
        info.number_of_files(),
        info.free_file_slots()
    );
    println!(
        "{} of {} blocks free ({} of block size {})",
        info.free_block_count(),
        info.block_count(),
        u64_to_sized_string(info.free_block_space()),
        u64_to_sized_string(info.block_size())
    );
}
