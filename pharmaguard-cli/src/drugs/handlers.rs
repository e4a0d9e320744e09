use anyhow::Result;
use clap::ArgMatches;
use serde::Serialize;

use pharmaguard::core::{Drug, Gene, REFERENCE_TABLE_VERSION};

#[derive(Serialize)]
struct DrugEntry {
    drug: Drug,
    primary_gene: Gene,
    genes: &'static [Gene],
}

#[derive(Serialize)]
struct DrugListing {
    reference_version: &'static str,
    drugs: Vec<DrugEntry>,
}

fn listing() -> DrugListing {
    DrugListing {
        reference_version: REFERENCE_TABLE_VERSION,
        drugs: Drug::ALL
            .iter()
            .map(|drug| DrugEntry {
                drug: *drug,
                primary_gene: drug.primary_gene(),
                genes: drug.genes(),
            })
            .collect(),
    }
}

pub fn run_drugs(_matches: &ArgMatches) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&listing())?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_listing_covers_all_drugs() {
        let json = serde_json::to_value(listing()).unwrap();
        let drugs = json["drugs"].as_array().unwrap();
        assert_eq!(drugs.len(), 6);
        assert_eq!(drugs[1]["drug"], "WARFARIN");
        assert_eq!(drugs[1]["genes"][1], "VKORC1");
    }
}
