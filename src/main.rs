use std::{env, fs::{self, create_dir, read_to_string}, path::PathBuf, process, time::Instant};

use transpiler::{display_error, lexer::lexer::tokenize, parser::parser::parse, transpiler::transpiler::transpile, type_checker::type_checker::type_check};

fn main() {
    setup_logging();

    let args: Vec<String> = env::args().collect();

    if args.len() != 2 {
        eprintln!("usage: transpiler <file.lang>");
        process::exit(1);
    }

    let file_path: &str = &args[1];
    let file_name = if file_path.contains("/") {
        file_path.split("/").last().unwrap()
    } else {
        file_path
    };

    let start = Instant::now();

    let file_contents = read_to_string(file_path).expect("Failed to read file!");

    let tokens = tokenize(file_contents, Some(String::from(file_name)));

    let tokens = match tokens {
        Ok(tokens) => tokens,
        Err(error) => {
            display_error(error, PathBuf::from(file_path));
            process::exit(1);
        }
    };

    println!("Tokenized in {:?}", start.elapsed());

    let parse_start = Instant::now();
    let (_, parsed) = parse(tokens, std::rc::Rc::new(String::from(file_name)));

    let program = match parsed {
        Ok(program) => program,
        Err(error) => {
            display_error(error, PathBuf::from(file_path));
            process::exit(1);
        }
    };

    println!("Parsed in {:?}", parse_start.elapsed());

    let type_check_start = Instant::now();
    let (mut type_checker, error) = type_check(&program);

    if let Some(error) = error {
        display_error(error, PathBuf::from(file_path));
        process::exit(1);
    }

    println!("Type checked in {:?}", type_check_start.elapsed());

    print!("{}", type_checker.report());

    let transpile_start = Instant::now();
    let output = transpile(&program, &mut type_checker);

    println!("Transpiled in {:?}", transpile_start.elapsed());
    println!("Total time: {:?}", start.elapsed());

    if !PathBuf::from("build").exists() {
        create_dir("build").unwrap();
    }

    fs::write("build/out.c", output).expect("Failed to write output file!");
    println!("Wrote build/out.c");
}

fn setup_logging() {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}: {}",
                record.level().to_string().to_lowercase(),
                message
            ))
        })
        .level(log::LevelFilter::Warn)
        .chain(std::io::stderr())
        .apply()
        .unwrap();
}
