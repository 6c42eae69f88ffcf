use scene_viewer::config::ViewerConfig;

fn main() -> anyhow::Result<()> {
    let config = ViewerConfig::from_env()?;
    scene_viewer::flow::run(config)
}
