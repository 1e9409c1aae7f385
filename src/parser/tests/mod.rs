//! Shared test fixtures for inventory parsing tests


/// Header row of the inventory file
pub const HEADER: &str = "s_id,cname1,cname2,cname3,genus,species,cultivar,lon,lat,dbh,height";

/// Build one inventory row from the fields the parser reads
#[allow(clippy::too_many_arguments)]
pub fn inventory_row(
    id: &str,
    common: &str,
    alt: &str,
    genus: &str,
    species: &str,
    lon: &str,
    lat: &str,
    height: &str,
) -> String {
    format!(
        "{},{},{},,{},{},,{},{},,{}",
        id, common, alt, genus, species, lon, lat, height
    )
}

/// A small inventory with three placeable rows and two unplaceable ones
pub fn sample_inventory() -> String {
    [
        HEADER.to_string(),
        inventory_row("P1", "Red Maple", "", "Acer", "rubrum", "-75.0001", "40.0001", "12"),
        inventory_row("P2", "White Oak", "Stave Oak", "Quercus", "alba", "-75.0010", "40.0010", ""),
        inventory_row("", "Orphan", "", "Ulmus", "americana", "-75.0", "40.0", "5"),
        inventory_row("P4", "Lost Pine", "", "Pinus", "strobus", "", "40.0", "5"),
        inventory_row("P5", "", "", "", "", "-75.0020", "40.0020", "x"),
    ]
    .join("\n")
}
