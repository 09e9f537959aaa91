mod capture;
mod intermediate;
mod mixer;
mod resampler;
