fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Server side of the auth API, client side of the user directory. The
    // directory server stubs are also generated so tests can fake it.
    tonic_build::configure()
        .build_server(true)
        .build_client(true)
        .compile(&["../proto/auth.proto", "../proto/user.proto"], &["../proto"])?;

    Ok(())
}
