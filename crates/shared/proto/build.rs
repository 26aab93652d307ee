fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Compile student service proto
    tonic_build::configure()
        .build_server(true)
        .build_client(true)
        .compile_protos(&["proto/student.proto"], &["proto/"])?;

    Ok(())
}
