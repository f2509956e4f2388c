//! Dispatcher tests against in-memory collaborators.

use super::*;
use crate::{
  history::SimulatedHistory,
  sources::{Country, League, LiveMatch, TeamInfo},
  strength::StrengthTable,
  testing::{MemoryKnowledge, StubSports, StubWiki},
};

type TestBot = Dispatcher<MemoryKnowledge, StubSports, StubWiki, SimulatedHistory>;

fn bot_with(sports: StubSports, wiki: StubWiki) -> TestBot {
  let engine = PredictionEngine::seeded(
    StrengthTable::default(),
    SimulatedHistory::reference(),
    42,
  );
  Dispatcher::new(MemoryKnowledge::default(), sports, wiki, engine)
}

fn bot() -> TestBot { bot_with(StubSports::default(), StubWiki::default()) }

fn team(id: i64, name: &str, country: &str) -> TeamInfo {
  TeamInfo {
    id,
    name: name.to_string(),
    country: Some(country.to_string()),
    founded: Some(1900),
    stadium: Some("Stade".to_string()),
  }
}

// ─── Commands ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn quit_says_goodbye() {
  assert_eq!(bot().respond("stop").await, FAREWELL);
}

#[tokio::test]
async fn malformed_input_gets_a_corrective_message() {
  let reply = bot().respond("historique beaucoup").await;
  assert_eq!(reply, "Format incorrect. Utilise 'historique 5' par exemple.");
}

#[tokio::test]
async fn every_exchange_is_logged_unvalidated() {
  let bot = bot();
  bot.respond("  stop ").await;
  let log = bot.knowledge().interactions().await.unwrap();
  assert_eq!(log.len(), 1);
  assert_eq!(log[0].question, "stop");
  assert_eq!(log[0].answer, FAREWELL);
  assert!(!log[0].validated);
}

// ─── Predictions ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn match_analysis_resolves_teams_and_logs_the_verdict() {
  let sports = StubSports {
    teams: vec![team(541, "Real Madrid", "Spain"), team(529, "Barcelona", "Spain")],
    ..Default::default()
  };
  let bot = bot_with(sports, StubWiki::default());

  let reply = bot.respond("Real Madrid vs Barcelona").await;
  assert_eq!(reply, "📊 Analyse: Real Madrid est favori (97 vs 91)");

  let lookups = bot.sports.lookups.lock().unwrap().clone();
  assert_eq!(lookups, vec!["Real Madrid", "Barcelona"]);

  let log = bot.predictions(None).await.unwrap();
  assert_eq!(log, vec![
    "Real Madrid vs Barcelona → 📊 Analyse: Real Madrid est favori (97 vs 91)"
  ]);
}

#[tokio::test]
async fn unresolvable_teams_still_get_a_verdict() {
  let reply = bot().respond("Unknown FC vs Also Unknown").await;
  assert_eq!(reply, "📊 Analyse: Match équilibré (75 vs 75)");
}

#[tokio::test]
async fn score_projection_is_logged() {
  let bot = bot();
  let reply = bot.respond("pronostic Manchester City vs Porto").await;
  assert!(reply.starts_with("🔮 Pronostic: Manchester City "), "{reply}");
  let log = bot.predictions(None).await.unwrap();
  assert_eq!(log.len(), 1);
  assert!(log[0].starts_with("Manchester City vs Porto → 🔮"));
}

#[tokio::test]
async fn history_lists_recent_predictions() {
  let bot = bot();
  assert_eq!(bot.respond("historique").await, NO_PREDICTIONS);

  bot.respond("Chelsea vs Juventus").await;
  bot.respond("PSG vs Manchester City").await;

  let all = bot.respond("historique").await;
  assert_eq!(all.lines().count(), 2);

  let last = bot.respond("historique 1").await;
  assert!(last.starts_with("PSG vs Manchester City → "), "{last}");

  assert_eq!(bot.respond("historique 0").await, all);
}

// ─── Knowledge ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn cached_answers_are_found_case_insensitively() {
  let bot = bot();
  bot
    .knowledge()
    .put("Qui est Zidane ?", Answer::from("Un entraîneur"))
    .await
    .unwrap();

  assert_eq!(bot.respond("QUI EST ZIDANE ?").await, "Un entraîneur");
  assert_eq!(bot.wiki.search_count(), 0);
}

#[tokio::test]
async fn correction_validates_only_matching_interactions() {
  let bot = bot();
  bot.respond("Qui est Zidane ?").await;
  bot.respond("Qui est Zidane ?").await;
  bot.respond("Autre question").await;

  let reply = bot.respond("corrige Qui est Zidane ? => Un entraîneur").await;
  assert_eq!(reply, "Merci ! Réponse corrigée (2 échange(s) validé(s)).");

  let log = bot.knowledge().interactions().await.unwrap();
  assert!(log[0].validated && log[1].validated);
  assert_eq!(log[0].answer, "Un entraîneur");
  assert!(!log[2].validated);
  assert_eq!(log[2].answer, NO_INFORMATION);

  assert_eq!(bot.respond("qui est zidane ?").await, "Un entraîneur");
}

#[tokio::test]
async fn responder_correct_reports_validated_count() {
  let bot = bot();
  bot.respond("Qui a gagné ?").await;
  let n = bot.correct("Qui a gagné ?", "L'OM".to_string()).await.unwrap();
  assert_eq!(n, 1);
  let cached = bot.cached("qui a gagné ?").await.unwrap();
  assert_eq!(cached, Some(Answer::from("L'OM")));
}

// ─── Fallback chain ──────────────────────────────────────────────────────────

#[tokio::test]
async fn known_club_is_described_from_the_sports_provider() {
  let sports = StubSports {
    teams: vec![team(18, "Chelsea", "England")],
    ..Default::default()
  };
  let bot = bot_with(sports, StubWiki::default());

  let reply = bot.respond("Parle-moi de Chelsea").await;
  assert_eq!(
    reply,
    "Chelsea est basé en England. Fondé en 1900, son stade est Stade."
  );

  let stored = bot.knowledge().get("chelsea").await.unwrap();
  assert!(matches!(stored, Some(Answer::ClubProfile(_))));
}

#[tokio::test]
async fn club_aliases_are_translated_before_lookup() {
  let sports = StubSports {
    teams: vec![team(591, "Paris Saint-Germain", "France")],
    ..Default::default()
  };
  let bot = bot_with(sports, StubWiki::default());

  let reply = bot.respond("Que vaut le PSG cette année").await;
  assert!(reply.starts_with("Paris Saint-Germain est basé en France."), "{reply}");
}

#[tokio::test]
async fn learning_a_club_makes_it_recognisable() {
  let wiki = StubWiki::default().with_page(
    "Lens (football)",
    "club de football français",
    "Le Racing Club de Lens est un club de football.",
  );
  let bot = bot_with(StubSports::default(), wiki);

  let learned = bot.respond("ajoute club Lens").await;
  assert_eq!(
    learned,
    "Selon Wikipedia (Lens (football)) : Le Racing Club de Lens est un club de football."
  );

  assert_eq!(bot.respond("Que sais-tu de Lens ?").await, learned);

  let again = bot.respond("ajoute club Lens").await;
  assert!(again.starts_with("Je connais déjà Lens. Voici ce que je sais : Selon Wikipedia"));
}

#[tokio::test]
async fn learning_an_already_cached_club_makes_it_recognisable() {
  let bot = bot();
  bot
    .knowledge()
    .put("lens", Answer::from("Le club artésien."))
    .await
    .unwrap();

  let reply = bot.respond("ajoute club Lens").await;
  assert_eq!(
    reply,
    "Je connais déjà Lens. Voici ce que je sais : Le club artésien."
  );
  assert_eq!(bot.respond("Que sais-tu de Lens ?").await, "Le club artésien.");
  assert_eq!(bot.wiki.search_count(), 0);
}

#[tokio::test]
async fn stored_club_profiles_are_recognised_after_loading() {
  let knowledge = MemoryKnowledge::default();
  knowledge
    .put("lens", ClubProfile::from_definition("Club nordiste.").into())
    .await
    .unwrap();
  knowledge
    .put("qui est zidane ?", Answer::from("Un entraîneur"))
    .await
    .unwrap();
  let engine = PredictionEngine::seeded(
    StrengthTable::default(),
    SimulatedHistory::reference(),
    42,
  );
  let bot = Dispatcher::new(
    knowledge,
    StubSports::default(),
    StubWiki::default(),
    engine,
  );

  assert_eq!(bot.respond("Parle-moi de Lens").await, NO_INFORMATION);
  assert_eq!(bot.load_known_clubs().await.unwrap(), 1);
  assert_eq!(bot.respond("Parle-moi de Lens").await, "Club nordiste.");
}

#[tokio::test]
async fn non_football_pages_are_skipped_when_learning() {
  let wiki = StubWiki::default().with_page("Lyon", "ville de France", "Lyon est une ville.");
  let bot = bot_with(StubSports::default(), wiki);
  let reply = bot.respond("ajoute club Lyon").await;
  assert_eq!(reply, "Je n'ai trouvé aucune info fiable sur 'Lyon'.");
}

#[tokio::test]
async fn wikipedia_prefers_football_titles_and_writes_through() {
  let wiki = StubWiki::default()
    .with_results("Qui est Zidane ? football", &["Zinédine", "Zidane (football)"])
    .with_page("Zidane (football)", "footballeur", "Zinédine Zidane est un footballeur.");
  let bot = bot_with(StubSports::default(), wiki);

  let reply = bot.respond("Qui est Zidane ?").await;
  assert_eq!(
    reply,
    "Selon Wikipedia (Zidane (football)) : Zinédine Zidane est un footballeur."
  );
  assert_eq!(
    bot.knowledge().get("qui est zidane ?").await.unwrap(),
    Some(Answer::from(reply))
  );
}

#[tokio::test]
async fn wikipedia_falls_back_to_the_top_result() {
  let wiki = StubWiki::default()
    .with_results("Qui est Pelé ?", &["Pelé", "Santos"])
    .with_page("Pelé", "joueur brésilien", "Pelé est un joueur brésilien.");
  let bot = bot_with(StubSports::default(), wiki);

  let reply = bot.respond("Qui est Pelé ?").await;
  assert_eq!(reply, "Selon Wikipedia (Pelé) : Pelé est un joueur brésilien.");
  assert_eq!(bot.wiki.search_count(), 4);
}

#[tokio::test]
async fn nothing_found_gives_the_default_answer() {
  let bot = bot();
  assert_eq!(bot.respond("Qui est Zidane ?").await, NO_INFORMATION);
  assert_eq!(bot.knowledge().get("qui est zidane ?").await.unwrap(), None);
}

#[tokio::test]
async fn statistics_come_from_the_static_table() {
  let reply = bot().respond("Qui a le plus de Ballons d'Or ?").await;
  assert!(reply.contains("Lionel Messi"), "{reply}");
}

#[tokio::test]
async fn unknown_statistic_falls_back_to_wikipedia() {
  let bot = bot();
  assert_eq!(bot.respond("combien de corners en 1998 ?").await, NO_INFORMATION);
  assert_eq!(bot.wiki.search_count(), 4);
}

// ─── Live data ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn live_data_is_formatted_or_reported_missing() {
  let sports = StubSports {
    live: vec![LiveMatch {
      home_team: "Lens".into(),
      away_team: "Lille".into(),
      score:     "1 - 0".into(),
      status:    "67".into(),
      league:    Some("Ligue 1".into()),
    }],
    countries: vec![
      Country { id: 44, name: "England".into() },
      Country { id: 6, name: "France".into() },
    ],
    leagues: vec![League {
      id:      168,
      name:    "Ligue 1".into(),
      country: Some("France".into()),
    }],
    ..Default::default()
  };
  let bot = bot_with(sports, StubWiki::default());

  assert_eq!(bot.respond("scores en direct").await, "⚽ Lens 1 - 0 Lille (67) [Ligue 1]");
  assert_eq!(bot.respond("pays disponibles").await, "🌍 Pays disponibles : England, France");
  assert_eq!(bot.respond("ligues en France").await, "🏆 Ligues en France : Ligue 1 (#168)");
  assert_eq!(bot.respond("ligues en Italie").await, "Aucune ligue trouvée pour Italie.");
  assert_eq!(
    bot.respond("équipes de la ligue 0").await,
    "Aucune équipe trouvée pour la ligue 0."
  );
}

#[tokio::test]
async fn empty_live_scores_are_not_an_error() {
  assert_eq!(bot().respond("live scores").await, "Aucun match en direct pour le moment.");
}

// ─── Classifier seam ─────────────────────────────────────────────────────────

struct AlwaysStatistic;

impl IntentClassifier for AlwaysStatistic {
  fn classify(&self, _: &str) -> Intent { Intent::Statistic }
}

#[tokio::test]
async fn custom_classifier_replaces_the_keyword_rules() {
  let bot = bot().with_classifier(AlwaysStatistic);
  let reply = bot.respond("Real Madrid vs Barcelona").await;
  assert_eq!(reply, NO_INFORMATION);
  assert!(bot.predictions(None).await.unwrap().is_empty());
}
