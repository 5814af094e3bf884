fn main() -> anyhow::Result<()> {
    pet_registry::cli::run_cli()
}
