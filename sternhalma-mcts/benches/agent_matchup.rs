//! Greedy vs MCTS Agent Benchmark
//!
//! Measures:
//! 1. Time to pick a move at each time budget
//! 2. Search volume (simulations per second)
//! 3. Head-to-head quality over short games

use std::time::{Duration, Instant};

use sternhalma_core::{Board, Game, GameConfig, GreedyAgent, Player};
use sternhalma_mcts::{run_search, CancelToken, MctsAgent};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// ============================================================================
// TEST POSITIONS
// ============================================================================

/// Standard two-player opening position
fn opening_position() -> (Board, GameConfig) {
    let config = GameConfig::standard(2).expect("two-player preset");
    let board = Board::new(&config);
    (board, config)
}

/// A mid-game position: both sides advanced a few plies greedily
fn midgame_position() -> (Board, GameConfig) {
    let config = GameConfig::standard(2).expect("two-player preset");
    let mut board = Board::new(&config);
    let mut red = GreedyAgent::with_seed(Player::Red, 11);
    let mut yellow = GreedyAgent::with_seed(Player::Yellow, 12);
    for _ in 0..6 {
        if let Some(mv) = red.best_move(&board) {
            board.apply(mv);
        }
        if let Some(mv) = yellow.best_move(&board) {
            board.apply(mv);
        }
    }
    (board, config)
}

// ============================================================================
// BENCHMARK STRUCTURES
// ============================================================================

#[derive(Clone, Debug)]
struct BenchRow {
    agent: String,
    config: String,
    avg_move_time_ms: f64,
    sims_per_second: f64,
}

impl BenchRow {
    fn to_table_row(&self) -> String {
        format!(
            "| {:11} | {:13} | {:10.2}ms | {:9.0} |",
            self.agent, self.config, self.avg_move_time_ms, self.sims_per_second
        )
    }
}

// ============================================================================
// BENCHMARK: Move Time and Search Volume
// ============================================================================

fn benchmark_move_time(board: &Board, config: &GameConfig, position_name: &str) -> Vec<BenchRow> {
    println!("\n=== MOVE TIME BENCHMARK: {} ===", position_name);
    let mut rows = Vec::new();

    // Greedy baseline
    print!("  Greedy ... ");
    let mut greedy = GreedyAgent::with_seed(Player::Red, 1);
    let iterations = 20;
    let start = Instant::now();
    for _ in 0..iterations {
        let _ = greedy.best_move(board);
    }
    let avg = start.elapsed().as_secs_f64() * 1000.0 / iterations as f64;
    rows.push(BenchRow {
        agent: "Greedy".to_string(),
        config: "-".to_string(),
        avg_move_time_ms: avg,
        sims_per_second: 0.0,
    });
    println!("{:.3}ms", avg);

    // MCTS at each budget
    let budgets_ms = [100u64, 500, 1000, 2000];
    for &budget in &budgets_ms {
        print!("  MCTS {}ms ... ", budget);
        let mut rng = ChaCha8Rng::seed_from_u64(budget);
        let iterations = 3;
        let mut total_time = 0.0;
        let mut total_sims = 0u64;

        for _ in 0..iterations {
            let start = Instant::now();
            let (_, stats) = run_search(
                board,
                Player::Red,
                Player::Yellow,
                config,
                Duration::from_millis(budget),
                &CancelToken::new(),
                &mut rng,
            );
            total_time += start.elapsed().as_secs_f64() * 1000.0;
            total_sims += stats.simulations as u64;
        }

        let avg = total_time / iterations as f64;
        let sims_per_sec = total_sims as f64 / (total_time / 1000.0);
        rows.push(BenchRow {
            agent: "MCTS".to_string(),
            config: format!("{}ms budget", budget),
            avg_move_time_ms: avg,
            sims_per_second: sims_per_sec,
        });
        println!("{:.0}ms avg, {:.0} sims/sec", avg, sims_per_sec);
    }

    rows
}

// ============================================================================
// BENCHMARK: Head-to-Head Quality
// ============================================================================

fn benchmark_head_to_head(max_turns: usize) {
    println!("\n=== HEAD-TO-HEAD: Greedy vs MCTS 500ms ===");

    for game_num in 0..3u64 {
        let config = GameConfig::standard(2).expect("two-player preset");
        let mut game = Game::new(config.clone()).expect("valid preset");
        let mut greedy = GreedyAgent::with_seed(Player::Red, game_num);
        let mut mcts = MctsAgent::with_seed(Player::Yellow, config, game_num);
        mcts.set_time_limit(500);

        let mut turns = 0;
        while game.winner().is_none() && turns < max_turns {
            let mv = match game.current_player() {
                Player::Red => greedy.best_move(game.board()),
                _ => mcts.best_move(game.board()),
            };
            match mv {
                Some(mv) => {
                    game.select_piece(mv.from);
                    game.move_piece(mv.to);
                }
                None => game.skip_turn(),
            }
            turns += 1;
        }

        let verdict = match game.winner() {
            Some(Player::Red) => "Greedy (red)".to_string(),
            Some(p) => format!("MCTS ({:?})", p),
            None => "unfinished".to_string(),
        };
        println!("  Game {}: {} after {} turns", game_num + 1, verdict, turns);
    }
}

// ============================================================================
// MAIN
// ============================================================================

fn main() {
    println!("\n=== STERNHALMA AGENT BENCHMARK ===");

    let (opening, config) = opening_position();
    let (midgame, _) = midgame_position();

    let mut rows = Vec::new();
    rows.extend(benchmark_move_time(&opening, &config, "Opening"));
    rows.extend(benchmark_move_time(&midgame, &config, "Mid-Game"));

    benchmark_head_to_head(200);

    println!("\n| Agent       | Config        | Avg Move     | Sims/Sec  |");
    println!("|-------------|---------------|--------------|-----------|");
    for row in &rows {
        println!("{}", row.to_table_row());
    }
    println!();
}
