use std::fs::{self, File};
use std::io::BufReader;
use rommesh::batch::BatchPlan;
use rommesh::generator::{self, MeshConfig, Ordering, GID_MAPPING_FILE_NAME, MESH_FILE_NAME, SUMMARY_FILE_NAME};
use rommesh::mesh_file::{read_gid_mapping, read_mesh};
use rommesh::sampling::{Sampling, SamplingKind, TargetSize};




fn random(n: usize, count: usize) -> MeshConfig {
    MeshConfig::full(n).with_sampling(Sampling::Random(TargetSize::Count(count)))
}




// ============================================================================
#[test]
fn full_mesh_of_four_by_four_cells() {
    let dir = tempfile::tempdir().unwrap();
    generator::generate(&MeshConfig::full(4)).unwrap().write_to_dir(dir.path()).unwrap();

    let mesh = read_mesh(BufReader::new(File::open(dir.path().join(MESH_FILE_NAME)).unwrap())).unwrap();
    assert_eq!(mesh.dx, 0.25);
    assert_eq!(mesh.num_residual_pts, 16);
    assert_eq!(mesh.num_state_pts, 16);
    assert_eq!(mesh.rows[0].id, 0);
    assert_eq!(mesh.rows[0].stencil().as_array(), [3, 4, 1, 12]);
    assert!(!dir.path().join(GID_MAPPING_FILE_NAME).exists());
}

#[test]
fn random_sample_of_three_cells() {
    let dir = tempfile::tempdir().unwrap();
    let artifact = generator::generate(&random(4, 3)).unwrap();
    artifact.write_to_dir(dir.path()).unwrap();

    let mesh = read_mesh(BufReader::new(File::open(dir.path().join(MESH_FILE_NAME)).unwrap())).unwrap();
    assert_eq!(mesh.num_residual_pts, 3);
    assert!((3..=15).contains(&mesh.num_state_pts));

    let mapping = read_gid_mapping(BufReader::new(File::open(dir.path().join(GID_MAPPING_FILE_NAME)).unwrap())).unwrap();
    assert_eq!(mapping.len(), mesh.num_state_pts);

    for (k, &(sm, fm)) in mapping.iter().enumerate() {
        assert_eq!(sm, k);
        assert_eq!(artifact.sample_mesh.fm_to_sm(fm), Some(sm));
    }
    assert!(mapping.windows(2).all(|w| w[0].1 < w[1].1));
}

#[test]
fn sample_stencils_agree_with_the_full_graph() {
    let artifact = generator::generate(&random(12, 20).with_ordering(Ordering::Rcm)).unwrap();
    let mut bytes = Vec::new();
    artifact.write_mesh(&mut bytes).unwrap();
    let mesh = read_mesh(&bytes[..]).unwrap();
    let sm = &artifact.sample_mesh;

    assert_eq!(mesh.num_residual_pts, 20);
    assert!(mesh.num_state_pts >= 20);

    for row in &mesh.rows {
        let fm = sm.sm_to_fm(row.id);
        let expected = artifact.graph.stencil(fm);
        assert_eq!(row.stencil().map(|s| sm.sm_to_fm(s)), *expected);

        let (x, y) = artifact.coordinates.get(fm);
        assert!((row.x - x).abs() < 1e-13 && (row.y - y).abs() < 1e-13);
    }
}

#[test]
fn identical_configs_give_identical_files() {
    for config in &[random(16, 40), random(16, 40).with_ordering(Ordering::Rcm), MeshConfig::full(9)] {
        let a = tempfile::tempdir().unwrap();
        let b = tempfile::tempdir().unwrap();
        generator::generate(config).unwrap().write_to_dir(a.path()).unwrap();
        generator::generate(config).unwrap().write_to_dir(b.path()).unwrap();

        for name in &[MESH_FILE_NAME, SUMMARY_FILE_NAME] {
            assert_eq!(fs::read(a.path().join(name)).unwrap(), fs::read(b.path().join(name)).unwrap());
        }
    }
}

#[test]
fn different_seeds_give_different_samples() {
    let a = generator::generate(&random(16, 10).with_seed(1)).unwrap();
    let b = generator::generate(&random(16, 10).with_seed(2)).unwrap();
    assert_ne!(a.sample_mesh.full_mesh_ids(), b.sample_mesh.full_mesh_ids());
}

#[test]
fn summary_is_written_beside_the_mesh() {
    let dir = tempfile::tempdir().unwrap();
    let artifact = generator::generate(&random(8, 6)).unwrap();
    artifact.write_to_dir(dir.path()).unwrap();

    let summary = generator::read_summary(&dir.path().join(SUMMARY_FILE_NAME)).unwrap();
    assert_eq!(summary, artifact.summary());
    assert_eq!(summary.sampling, SamplingKind::Random);
    assert_eq!(summary.num_residual_pts, 6);
}

#[test]
fn batch_writes_every_case() {
    let dir = tempfile::tempdir().unwrap();
    let plan = BatchPlan {
        sizes: vec![4, 8],
        percentages: vec![25.0, 50.0],
        ..BatchPlan::new(dir.path(), Ordering::Rcm)
    };
    let summaries = plan.run().unwrap();
    assert_eq!(summaries.len(), 6);

    let sample_dir = dir.path().join("meshes_rcm").join("8x8").join("sample_pct25");
    let mesh = read_mesh(BufReader::new(File::open(sample_dir.join(MESH_FILE_NAME)).unwrap())).unwrap();
    assert_eq!(mesh.num_residual_pts, 16);
    assert!(sample_dir.join(GID_MAPPING_FILE_NAME).exists());

    let full_dir = dir.path().join("meshes_rcm").join("4x4").join("full");
    assert!(full_dir.join(MESH_FILE_NAME).exists());
    assert!(!full_dir.join(GID_MAPPING_FILE_NAME).exists());
}
