#![allow(clippy::missing_panics_doc, clippy::float_cmp)]
//! Integration tests running the full simulated workflow on a small FASTA file
use indexmap::IndexMap;
use proteosim::{parse_json::ParseJson, prelude::*, sequence::coverage_collection};

const FASTA: &str = "tests/data/test_proteins.fasta";

fn proteins() -> IndexMap<String, String> {
    read_fasta(FASTA).unwrap()
}

#[test]
fn read_proteins() {
    let proteins = proteins();
    assert_eq!(proteins.keys().collect::<Vec<_>>(), ["P12345", "Q67890"]);
    assert_eq!(proteins["P12345"], "MSEQNNTEMTFQIQRIYTKDISFEAPNAPHVF");
    assert_eq!(proteins["Q67890"].len(), 158);
    assert!(proteins["Q67890"].starts_with("LLPDEVKSEEQ"));
    assert!(proteins["Q67890"].ends_with("SEEQSLREQLAQLY"));
}

#[test]
fn missing_file() {
    let error = read_fasta("tests/data/does_not_exist.fasta").unwrap_err();
    assert_eq!(error.get_kind(), ProteosimError::Io);
}

/// Digest, cover, weigh, and charge all proteins from the FASTA file
#[test]
fn full_workflow() {
    let proteins = proteins();
    let peptides = digest_collection(
        &proteins,
        Enzyme::Trypsin.rule(),
        DigestSettings::default(),
    );
    assert_eq!(peptides.keys().collect::<Vec<_>>(), ["P12345", "Q67890"]);
    assert_eq!(peptides["P12345"], ["MSEQNNTEMTFQIQR", "DISFEAPNAPHVF"]);
    assert_eq!(peptides["Q67890"].len(), 17);
    assert_eq!(peptides["Q67890"][0], "LLPDEVK");
    assert_eq!(peptides["Q67890"][16], "EQLAQLY");

    let coverage = coverage_collection(&proteins, &peptides);
    assert_eq!(coverage["P12345"], 87.5);
    assert!((coverage["Q67890"] - 156.0 / 158.0 * 100.0).abs() < 1e-9);

    let all_peptides: Vec<&String> = peptides.values().flatten().collect();
    let table = ResidueMassTable::standard();
    let masses = molecular_mass_collection(&all_peptides, table).unwrap();
    // Duplicated peptides are only stored once
    assert_eq!(masses.len(), 9);
    for (peptide, mass) in &masses {
        let expected: f64 = peptide.chars().map(|c| table.get(c).unwrap()).sum();
        assert!((mass - expected).abs() < 1e-9, "{peptide}");
    }

    let mz = mass_to_charge_collection(&masses, MzSettings::default()).unwrap();
    assert_eq!(mz.keys().collect::<Vec<_>>(), masses.keys().collect::<Vec<_>>());
    for (peptide, value) in &mz {
        assert!((value - (masses[peptide] + 2.0 * 1.007) / 2.0).abs() < 1e-9);
    }
}

/// Predict retention times, select a window, and simulate the MS1 signal of those peptides
#[test]
fn retention_and_spectrum() {
    let proteins = proteins();
    let peptides = digest_collection(&proteins, Enzyme::LysC.rule(), DigestSettings::default());
    let all_peptides: Vec<&String> = peptides.values().flatten().collect();

    let model = AdditiveRetentionModel::new(
        ResidueMassTable::standard()
            .iter()
            .map(|(residue, mass)| (residue, mass / 100.0)),
        1.0,
    );
    let times = predict_retention_times(&all_peptides, &model).unwrap();
    assert_eq!(times.len(), 7);
    let mut sorted: Vec<f64> = times.values().copied().collect();
    sorted.sort_by(f64::total_cmp);
    let selected = select_retention_window(&times, sorted[1], sorted[3]).unwrap();
    assert_eq!(selected.len(), 3);

    let histogram = retention_time_histogram(&sorted, 4).unwrap();
    assert_eq!(histogram.iter().map(|b| b.count).sum::<usize>(), 7);
    assert_eq!(histogram.first().map(|b| b.start), Some(sorted[0]));
    assert_eq!(histogram.last().map(|b| b.end), Some(sorted[6]));

    let masses = molecular_mass_collection(&selected, ResidueMassTable::standard()).unwrap();
    let mz = mass_to_charge_collection(&masses, MzSettings::with_charge(3)).unwrap();
    let values: Vec<f64> = mz.values().copied().collect();
    let spectrum = simulate_spectrum(&values, IntensityMode::default());
    assert_eq!(spectrum.len(), 3);
    assert!(spectrum.windows(2).all(|w| w[0].mz < w[1].mz));
    assert!(spectrum.iter().all(|p| p.intensity <= 30_000));
}

/// The built-in retention model scores every standard residue
#[test]
fn default_retention_model() {
    let proteins = proteins();
    let peptides = digest_collection(&proteins, Enzyme::LysC.rule(), DigestSettings::default());
    let all_peptides: Vec<&String> = peptides.values().flatten().collect();
    let model = AdditiveRetentionModel::guo_ph7();
    let times = predict_retention_times(&all_peptides, model).unwrap();
    assert_eq!(times.len(), 7);
    assert!(times.values().all(|time| time.is_finite()));
}

#[test]
fn lysc_exact_length() {
    assert_eq!(
        digest_sequence(
            "MKWKQLKAAMKMMMMMKQLAAAAAKA",
            Enzyme::LysC.rule(),
            DigestSettings::with_lengths(3, Some(3))
        ),
        ["QLK"]
    );
}

#[test]
fn trypsin_proline() {
    assert_eq!(
        digest_sequence(
            "AKRPAKRPAAK",
            Enzyme::Trypsin.rule(),
            DigestSettings::with_lengths(2, None)
        ),
        ["AK", "RPAK", "RPAAK"]
    );
}

/// Splitting without any filter gives back the full sequence when concatenated
#[test]
fn concatenation() {
    let proteins = proteins();
    let sequences = proteins
        .values()
        .map(String::as_str)
        .chain(["K", "KK", "PKP", "KRKRP", "MKWKQLKAAMKMMMMMKQLAAAAAKA", "XYZ"]);
    for sequence in sequences {
        for enzyme in Enzyme::ALL {
            let pieces =
                digest_sequence(sequence, enzyme.rule(), DigestSettings::with_lengths(0, None));
            assert_eq!(pieces.concat(), sequence, "{enzyme} on {sequence}");
        }
    }
}

#[test]
fn length_filter() {
    let proteins = proteins();
    for (min, max) in [(0, Some(0)), (1, Some(5)), (5, Some(30)), (7, Some(7)), (10, None)] {
        for enzyme in Enzyme::ALL {
            for sequence in proteins.values() {
                let settings = DigestSettings::with_lengths(min, max);
                for peptide in digest_sequence(sequence, enzyme.rule(), settings) {
                    let length = peptide.chars().count();
                    assert!(length >= min, "{peptide} shorter than {min}");
                    assert!(length <= max.unwrap_or(sequence.len()), "{peptide} too long");
                }
            }
        }
    }
}

#[test]
fn mass_additivity() {
    let standard = molecular_mass("AK", ResidueMassTable::standard()).unwrap();
    assert!((standard - (71.08 + 128.17)).abs() < 1e-9);
    let custom = ResidueMassTable::new([('A', 1.5), ('K', 2.25), ('Z', 10.0)]).unwrap();
    assert_eq!(molecular_mass("AKZ", &custom).unwrap(), 13.75);
    assert_eq!(molecular_mass("", &custom).unwrap(), 0.0);
    assert_eq!(
        molecular_mass("AKR", &custom).unwrap_err().get_kind(),
        ProteosimError::Lookup
    );
}

#[test]
fn charge() {
    assert_eq!(mass_to_charge(200.0, 2, 1.0).unwrap(), 101.0);
    assert_eq!(
        mass_to_charge(200.0, -1, 1.0).unwrap_err().get_kind(),
        ProteosimError::InvalidArgument
    );
}

#[test]
fn fragments() {
    let fragments = fragment_peptide("PEPT");
    assert_eq!(fragments.len(), 7);
    for fragment in ["P", "PE", "PEP", "PEPT", "EPT", "PT", "T"] {
        assert!(fragments.contains(fragment), "{fragment}");
    }
    let ions = fragment_ions("PEPT");
    assert_eq!(ions.len(), 8);
    assert_eq!(ions.iter().filter(|i| i.series == IonSeries::B).count(), 4);
    let b1 = ions[0]
        .mz(ResidueMassTable::standard(), MzSettings::with_charge(1))
        .unwrap();
    assert!((b1 - (97.12 + 1.007)).abs() < 1e-9);
}

#[test]
fn coverage() {
    assert_eq!(sequence_coverage("ABCDEFGH", &["ABC", "EF"]), 62.5);
    assert_eq!(sequence_coverage("", &["ABC"]), 0.0);
}

#[test]
fn retention_window() {
    let times: IndexMap<String, f64> = [("pep1", 10.0), ("pep2", 12.5), ("pep3", 15.0)]
        .into_iter()
        .map(|(p, t)| (p.to_string(), t))
        .collect();
    assert_eq!(select_retention_window(&times, 11.0, 15.0).unwrap(), ["pep2", "pep3"]);
    assert_eq!(
        select_retention_window(&times, 12.0, 10.0).unwrap_err().get_kind(),
        ProteosimError::InvalidArgument
    );
}

/// Running the same steps twice gives the same results
#[test]
fn idempotence() {
    let run = || {
        let proteins = proteins();
        let peptides = digest_collection(
            &proteins,
            Enzyme::ArgC.rule(),
            DigestSettings::with_lengths(2, Some(40)).missed_cleavages(1),
        );
        let all: Vec<&String> = peptides.values().flatten().collect();
        let masses = molecular_mass_collection(&all, ResidueMassTable::standard()).unwrap();
        let mz = mass_to_charge_collection(&masses, MzSettings::default()).unwrap();
        let values: Vec<f64> = mz.values().copied().collect();
        let spectrum = simulate_spectrum(&values, IntensityMode::default());
        (peptides, masses, mz, spectrum)
    };
    assert_eq!(run(), run());
}

#[test]
fn config_file() {
    let config = SimulationConfig::from_json(
        r#"{"enzyme": "LysC", "digest": {"min_length": 3, "max_length": 3}}"#,
    )
    .unwrap();
    let peptides = digest_sequence(
        "MKWKQLKAAMKMMMMMKQLAAAAAKA",
        config.enzyme.rule(),
        config.digest,
    );
    assert_eq!(peptides, ["QLK"]);
}
