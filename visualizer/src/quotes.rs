use rand::seq::SliceRandom;

pub const INVESTING_QUOTES: [&str; 4] = [
    "The stock market is filled with individuals who know the price of everything, but the value of nothing. - Philip Fisher",
    "The stock market is a device for transferring money from the impatient to the patient. - Warren Buffett",
    "In investing, what is comfortable is rarely profitable. - Robert Arnott",
    "Investing should be more like watching paint dry or watching grass grow. If you want excitement, take $800 and go to Las Vegas. - Paul Samuelson",
];

pub fn random_quote() -> &'static str {
    INVESTING_QUOTES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or_default()
}
