use std::path::Path;
use std::process::Command;

use tempfile::tempdir;

const HAPLOTYPES: &str = "\
sequence_id\tsequence\tsequence_length\tn_variants\tvariants\tsource\tgnomAD_AF_afr
0\tNNNN\t31\t3\t1:500:A:T,1:505:C:G,1:510:T:A\tHGDP_haplotype\t0.1,0.2,0.3
";

fn write_index(dir: &Path) {
    std::fs::write(dir.join("haplotypes.tsv"), HAPLOTYPES).unwrap();
    std::fs::write(
        dir.join("index.toml"),
        "version = \"cli-v7\"\nwindow_size = 10\nhaplotypes = \"haplotypes.tsv\"\n",
    )
    .unwrap();
}

fn divref() -> Command {
    Command::new(env!("CARGO_BIN_EXE_divref"))
}

#[test]
fn test_remap_writes_output() {
    let dir = tempdir().unwrap();
    write_index(dir.path());
    std::fs::write(
        dir.path().join("hits.csv"),
        "chromosome,coordinate_start,coordinate_end,strand,padded_target,unpadded_target_sequence\n\
         0,12,17,+,ACGTAGG,ACGTA\n",
    )
    .unwrap();

    let status = divref()
        .arg("remap")
        .arg(dir.path().join("hits.csv"))
        .arg(dir.path().join("out/hits.remapped.csv"))
        .arg("-i")
        .arg(dir.path().join("index.toml"))
        .args(["-s", ","])
        .status()
        .unwrap();
    assert!(status.success());

    let output = std::fs::read_to_string(dir.path().join("out/hits.remapped.csv")).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("chromosome,coordinate_start,coordinate_end,"));
    assert!(lines[1].starts_with("1,502,509,+,ACGTAGG,ACGTA,0,12,17,GRCh38,"));
}

#[test]
fn test_unresolved_haplotype_exits_nonzero() {
    let dir = tempdir().unwrap();
    write_index(dir.path());
    std::fs::write(
        dir.path().join("hits.tsv"),
        "chromosome\tcoordinate_start\tcoordinate_end\n0\t12\t17\n42\t1\t3\n",
    )
    .unwrap();

    let output = divref()
        .arg("remap")
        .arg(dir.path().join("hits.tsv"))
        .arg(dir.path().join("hits.remapped.tsv"))
        .arg("-i")
        .arg(dir.path().join("index.toml"))
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("42"), "{}", stderr);
    assert!(stderr.contains("cli-v7"), "{}", stderr);
    assert!(!dir.path().join("hits.remapped.tsv").exists());
}

#[test]
fn test_missing_columns_exits_nonzero() {
    let dir = tempdir().unwrap();
    write_index(dir.path());
    std::fs::write(dir.path().join("hits.tsv"), "chromosome\tstart\n0\t12\n").unwrap();

    let output = divref()
        .arg("remap")
        .arg(dir.path().join("hits.tsv"))
        .arg(dir.path().join("hits.remapped.tsv"))
        .arg("-i")
        .arg(dir.path().join("index.toml"))
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("coordinate_start"), "{}", stderr);
}
