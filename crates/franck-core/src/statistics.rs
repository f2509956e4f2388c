//! A small table of well-known football records.

struct Statistic {
  /// Every keyword must appear in the (lowercased) question.
  keywords: &'static [&'static str],
  answer:   &'static str,
}

const STATISTICS: &[Statistic] = &[
  Statistic {
    keywords: &["ballon", "or"],
    answer:   "Lionel Messi détient le record de Ballons d'Or avec 8 trophées.",
  },
  Statistic {
    keywords: &["coupe", "monde"],
    answer:   "Le Brésil a remporté le plus de Coupes du monde : 5 titres.",
  },
  Statistic {
    keywords: &["ligue", "champions", "buteur"],
    answer:   "Cristiano Ronaldo est le meilleur buteur de l'histoire de la Ligue des champions avec 140 buts.",
  },
  Statistic {
    keywords: &["ligue", "champions"],
    answer:   "Le Real Madrid détient le record de victoires en Ligue des champions : 15 titres.",
  },
  Statistic {
    keywords: &["buteur", "ligue 1"],
    answer:   "Delio Onnis est le meilleur buteur de l'histoire de la Ligue 1 avec 299 buts.",
  },
  Statistic {
    keywords: &["buteur", "sélection"],
    answer:   "Cristiano Ronaldo est le meilleur buteur en sélection nationale, avec plus de 130 buts pour le Portugal.",
  },
];

/// Static answers for statistic questions. Entries are tried in order, so
/// more specific ones come first.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatisticTable;

impl StatisticTable {
  pub fn lookup(&self, question: &str) -> Option<&'static str> {
    let question = question.to_lowercase();
    STATISTICS
      .iter()
      .find(|s| s.keywords.iter().all(|kw| question.contains(kw)))
      .map(|s| s.answer)
  }
}
