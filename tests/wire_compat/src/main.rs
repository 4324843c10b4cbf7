fn main() {
    println!("Run `cargo test -p wire-compat` to execute wire compatibility tests.");
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use uplink_protocol::{ChunkUploadParams, ChunkUploadResponse};

    /// Returns the path to the fixtures directory.
    fn fixtures_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
    }

    /// Loads a fixture JSON file and returns it as a `serde_json::Value`.
    fn load_fixture(name: &str) -> serde_json::Value {
        let path = fixtures_dir().join(name);
        let data = fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()));
        serde_json::from_str(&data)
            .unwrap_or_else(|e| panic!("failed to parse fixture {}: {e}", path.display()))
    }

    #[test]
    fn chunk_params_match_server_contract() {
        let params = ChunkUploadParams {
            name: "a.bin".into(),
            size: 25_600,
            current_chunk_index: 1,
            total_chunks: 3,
        };
        let serialized = serde_json::to_value(&params).unwrap();
        assert_eq!(serialized, load_fixture("chunk_params_intermediate.json"));
    }

    #[test]
    fn empty_file_params_carry_zero_total_chunks() {
        let params = ChunkUploadParams {
            name: "empty.bin".into(),
            size: 0,
            current_chunk_index: 0,
            total_chunks: 0,
        };
        let serialized = serde_json::to_value(&params).unwrap();
        assert_eq!(serialized, load_fixture("chunk_params_empty_file.json"));
    }

    #[test]
    fn intermediate_response_parses_without_final_filename() {
        let fixture = load_fixture("response_intermediate.json");
        let response: ChunkUploadResponse = serde_json::from_value(fixture).unwrap();
        assert_eq!(response.final_filename, None);
    }

    #[test]
    fn final_response_carries_final_filename() {
        let fixture = load_fixture("response_final.json");
        let response: ChunkUploadResponse = serde_json::from_value(fixture).unwrap();
        assert_eq!(response.final_filename.as_deref(), Some("a123.bin"));
    }

    #[test]
    fn params_parse_back_from_server_side_representation() {
        let fixture = load_fixture("chunk_params_intermediate.json");
        let params: ChunkUploadParams = serde_json::from_value(fixture).unwrap();
        assert_eq!(params.name, "a.bin");
        assert_eq!(params.size, 25_600);
        assert_eq!(params.current_chunk_index, 1);
        assert_eq!(params.total_chunks, 3);
    }
}
