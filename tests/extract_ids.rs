use mesa_scraper::config::Config;
use mesa_scraper::run_extraction;
use mesa_scraper::ScrapeError;

fn config_in(dir: &tempfile::TempDir) -> Config {
    Config {
        nomenclator_file: dir.path().join("getNomenclator.json").display().to_string(),
        mesas_file: dir.path().join("mesas.csv").display().to_string(),
        extracted_ids_file: dir.path().join("ids.csv").display().to_string(),
        ..Config::default()
    }
}

#[tokio::test]
async fn test_extraction_writes_middle_ids() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);
    std::fs::write(
        &config.nomenclator_file,
        r#"{"amb":[
            {"ambitos":[{"co":"0001","r":[7,3,9,5]},{"co":"0002","r":[1,2,3]}]},
            {"ambitos":[{"co":"0003","r":["40","10","30","20"]}]}
        ]}"#,
    )
    .unwrap();
    std::fs::write(&config.mesas_file, "mesa,codigo\n1,0001\n2,0002\n3,0003\n4,9999\n").unwrap();

    let summary = run_extraction(&config).await.unwrap();
    assert_eq!(summary.rows, 4);
    assert_eq!(summary.matched, 2);

    let output = std::fs::read_to_string(&config.extracted_ids_file).unwrap();
    assert_eq!(
        output,
        "co,id2_intermedio,id3_intermedio\n0001,5,7\n0002,,\n0003,20,30\n9999,,\n"
    );
}

#[tokio::test]
async fn test_extraction_aborts_on_malformed_range() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);
    std::fs::write(
        &config.nomenclator_file,
        r#"{"amb":[{"ambitos":[{"co":"0001","r":[7,"n/a",9,5]}]}]}"#,
    )
    .unwrap();
    std::fs::write(&config.mesas_file, "mesa,codigo\n1,0001\n").unwrap();

    let err = run_extraction(&config).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ScrapeError>(),
        Some(ScrapeError::DataIntegrity { .. })
    ));
    assert!(!std::path::Path::new(&config.extracted_ids_file).exists());
}
