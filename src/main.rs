use env_logger::Env;
use vigil::sampler::SamplerConfig;

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    vigil::run(SamplerConfig::default());
}
