use tf_idf_recommender::{MemoryCorpusProvider, Recommender, RecommenderConfig};

fn main() {
    // build corpus
    let provider = MemoryCorpusProvider::from_pairs([
        ("HP ini murah dan bagus!", "hp murah bagus"),
        ("Kameranya jernih banget", "kamera jernih banget"),
        ("Baterai awet, harga murah", "baterai awet harga murah"),
        ("Layar lebar, kamera oke", "layar lebar kamera oke"),
    ]);

    // build recommender
    let recommender = match Recommender::build(&provider, RecommenderConfig::default()) {
        Ok(recommender) => recommender,
        Err(e) => {
            eprintln!("build failed: {e}");
            return;
        }
    };

    // query
    match recommender.recommend("murah") {
        Ok(rec) => {
            println!("Anchor: #{} {}", rec.anchor.index, rec.anchor.raw_text);
            println!("Results: \n{:#?}", rec.ranked);
        }
        Err(e) => println!("{e}"),
    }

    // debug
    println!("{:?}", recommender.stats());
}
