use ifc_reader::{File, Result, Target};
use std::env;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <path-to-ifc-file> [--limit <N>]", args[0]);
        std::process::exit(1);
    }

    let ifc_path = &args[1];
    let mut limit = usize::MAX;
    if let Some(limit_idx) = args.iter().position(|arg| arg == "--limit") {
        match args.get(limit_idx + 1).map(|s| s.parse::<usize>()) {
            Some(Ok(n)) => limit = n,
            Some(Err(_)) => {
                eprintln!("ERROR: --limit expects a number.");
                std::process::exit(1);
            }
            None => {
                eprintln!("ERROR: --limit flag requires an argument.");
                std::process::exit(1);
            }
        }
    }

    println!("Reading IFC file: {}", ifc_path);
    println!("{}", "=".repeat(60));

    let file = match File::open(ifc_path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("\nERROR: Failed to open IFC file");
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = dump(&file, limit) {
        eprintln!("\nERROR: Failed to read IFC file");
        eprintln!("  {}", e);
        std::process::exit(1);
    }
}

fn dump(file: &File, limit: usize) -> Result<()> {
    let header = file.header();
    println!("\nFile Information:");
    println!("  Version: {}.{}", header.major_version, header.minor_version);
    println!("  ABI: {}, architecture: {}", header.abi, header.arch);
    println!("  Source: {}", file.get_string(header.src_path)?);
    println!("  Partitions: {}", file.directory().len());
    println!("  Global scope index: {}", header.global_scope);

    println!("\nStatistics:");
    println!("  Declarations: {}", file.declarations()?.len());
    println!("  Scopes: {}", file.scope_descriptors()?.len());
    println!("  Scoped declarations: {}", file.scoped_declaration_count()?);

    println!("\nDirectory:");
    for entry in file.directory().entries() {
        println!(
            "  {:<40} {:>8} x {:>3} bytes at {:#010x}",
            entry.name, entry.cardinality, entry.entry_size, entry.offset
        );
    }

    let scope = file.global_scope()?;
    let members = file.scope_members(scope)?;
    println!("\nGlobal Scope ({} members):", members.len());
    for (i, member) in members.iter().take(limit).enumerate() {
        let index = member.index();
        if index.is_null() {
            println!("  {}. <null>", i + 1);
            continue;
        }
        match index.sort() {
            Ok(sort) => {
                let partition = match sort.target() {
                    Target::Partition(kind) => kind.name(),
                    Target::Text => "<text>",
                    Target::Immediate => "<immediate>",
                };
                println!("  {}. {:?} #{} in {}", i + 1, sort, index.index(), partition);
            }
            Err(e) => println!("  {}. raw {:#x}: {}", i + 1, index.raw(), e),
        }
    }

    if members.len() > limit {
        println!("  ... and {} more", members.len() - limit);
    }

    Ok(())
}
