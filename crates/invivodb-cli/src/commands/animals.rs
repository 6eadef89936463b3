//! Animal commands - initialise the database, add and list animals.

use colored::Colorize;
use invivodb::{AnimalRegistry, InvivoConfig, NewAnimal};

pub fn init(config: InvivoConfig) -> Result<(), Box<dyn std::error::Error>> {
    let registry = AnimalRegistry::open(config)?;
    let species = registry.list_species()?;
    println!(
        "{} {} ({} species)",
        "Initialised".green().bold(),
        registry.config().database_path.display(),
        species.len()
    );
    Ok(())
}

pub fn add(
    config: InvivoConfig,
    species_id: Option<i64>,
    scientific_name: Option<String>,
    mut new: NewAnimal,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut registry = AnimalRegistry::open(config)?;

    let species = match (species_id, scientific_name) {
        (Some(id), _) => registry.get_species(id)?,
        (None, Some(name)) => registry.find_species_by_name(&name)?,
        (None, None) => return Err("Must specify --species-id or --scientific-name".into()),
    }
    .ok_or("Invalid species selected")?;

    new.species_id = species.id;
    let animal = registry.create_animal(&new)?;

    println!(
        "Animal {} added successfully! ({}, id {})",
        animal.accession_number.white().bold(),
        species.common_name,
        animal.id
    );
    Ok(())
}

pub fn list(
    config: InvivoConfig,
    species_id: Option<i64>,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let registry = AnimalRegistry::open(config)?;
    let animals = registry.list_animals(species_id)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&animals)?);
        return Ok(());
    }

    if animals.is_empty() {
        println!("No animals registered.");
        return Ok(());
    }

    for animal in &animals {
        let accession = if animal.accession().is_some() {
            animal.accession_number.white()
        } else {
            animal.accession_number.yellow()
        };
        println!(
            "{:>5}  {:<16} {:<12} {:<8} {}",
            animal.id,
            accession,
            animal.strain.as_deref().unwrap_or("-"),
            animal.sex.as_deref().unwrap_or("-"),
            animal.created_at.format("%Y-%m-%d")
        );
    }
    println!();
    println!("{} animals", animals.len());
    Ok(())
}
