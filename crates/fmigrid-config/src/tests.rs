#[cfg(test)]
mod tests {
    use super::super::*;
    use fmigrid_common::FmigridError;
    use std::path::PathBuf;

    #[test]
    fn test_defaults_without_file() {
        let config = Config::default();
        assert_eq!(config.targets.gene_list, PathBuf::from("/usr/local/data/fmi_gene_list.txt"));
        assert_eq!(config.extract.output_suffix, "_fmi");
        assert_eq!(config.plot.outfile, PathBuf::from("fmi_table.png"));
        assert_eq!(config.plot.columns, 10);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml(
            r#"
            [plot]
            columns = 6
            "#,
        )
        .unwrap();
        assert_eq!(config.plot.columns, 6);
        assert_eq!(config.plot.cell_height, default_cell_height());
        assert_eq!(config.targets.gene_list, default_gene_list());
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.plot.font_size, default_font_size());
        assert_eq!(config.plot.margin, default_margin());
    }

    #[test]
    fn test_from_file_malformed_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fmigrid.toml");
        std::fs::write(&path, "[plot\ncolumns = ").unwrap();
        let err = Config::from_file(&path).unwrap_err();
        assert!(matches!(err, FmigridError::Config(_)), "got {err:?}");
    }

    #[test]
    fn test_from_file_reads_gene_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fmigrid.toml");
        std::fs::write(&path, "[targets]\ngene_list = \"/data/genes.txt\"\n").unwrap();
        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.targets.gene_list, PathBuf::from("/data/genes.txt"));
    }

    #[test]
    fn test_explicit_missing_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        let err = Config::load_from(Some(path)).unwrap_err();
        assert!(matches!(err, FmigridError::Config(ref msg) if msg.contains(CONFIG_ENV_VAR)), "got {err:?}");
    }

    #[test]
    fn test_explicit_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[extract]\noutput_suffix = \"_panel\"\n").unwrap();
        let config = Config::load_from(Some(path)).unwrap();
        assert_eq!(config.extract.output_suffix, "_panel");
    }
}
