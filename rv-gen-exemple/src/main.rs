use rv_gen_core::model::generation_input::GenerationInput;
use rv_gen_core::{ReviewGenerator, Settings};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Usage: rv-gen-exemple [config.toml] [count]
    let mut args = std::env::args().skip(1);
    let config_path = args.next().unwrap_or_else(|| "./config.toml".to_owned());
    let count: usize = match args.next() {
        Some(n) => n.parse()?,
        None => 5,
    };

    // Settings come from the [app_settings] table: training data file,
    // markov order (1 to 5), word count range and optional step cap
    let settings = Settings::from_toml_file(&config_path)?;

    // Train the chain once; it is read-only from now on
    let generator = ReviewGenerator::from_settings(&settings)?;
    println!(
        "Trained an order-{} chain with {} states",
        generator.table().order(),
        generator.table().len()
    );

    // An invalid word count range is refused
    match GenerationInput::new(36, 12) {
        Ok(_) => println!("Should not happen"),
        Err(e) => println!("Range 36..=12 is invalid: {e}"),
    }

    // Every call gets its own random source; a seeded one would replay the same reviews
    let mut rng = rand::rng();
    for i in 0..count {
        let review = generator.generate(&mut rng)?;
        println!("Generated review {}:\n{}", i + 1, serde_json::to_string_pretty(&review)?);
    }

    Ok(())
}
