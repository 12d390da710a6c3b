//! Main application state and UI

use eframe::egui;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use std::path::Path;
use std::sync::mpsc::{channel, Receiver};
use std::thread;

use crate::mutation::{
    exhaustive_substitution_count, generate_with_rng, is_standard_base, n_choose_k,
    sanitize_input, FillSide, GenerateError, GenerateParams, GenerationResults, MutationMode,
    MAX_SAMPLE_SIZE,
};

/// Rows rendered in the results grid; larger runs are exported, not scrolled
const MAX_DISPLAY_ROWS: usize = 2_000;

/// Application state
pub struct AptamutApp {
    // Input tab state
    sequence_input: String,
    sequence_clean: Option<String>,
    sequence_error: Option<String>,
    forward_input: String,
    reverse_input: String,

    // Generation parameters
    params: GenerateParams,
    use_fixed_seed: bool,
    seed: u64,

    // Generation state
    is_generating: bool,
    results_rx: Option<Receiver<Result<GenerationResults, GenerateError>>>,
    generation_error: Option<String>,

    // Results state
    results: Option<GenerationResults>,
    display_column: DisplayColumn,

    // View state
    current_tab: Tab,

    // Save/Load/Export
    save_error: Option<String>,
    load_error: Option<String>,
    export_error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Input,
    Setup,
    Results,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DisplayColumn {
    Full,
    Core,
}

impl Default for AptamutApp {
    fn default() -> Self {
        Self {
            sequence_input: String::new(),
            sequence_clean: None,
            sequence_error: None,
            forward_input: String::new(),
            reverse_input: String::new(),
            params: GenerateParams::default(),
            use_fixed_seed: false,
            seed: 0,
            is_generating: false,
            results_rx: None,
            generation_error: None,
            results: None,
            display_column: DisplayColumn::Full,
            current_tab: Tab::Input,
            save_error: None,
            load_error: None,
            export_error: None,
        }
    }
}

impl AptamutApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self::default()
    }

    fn parse_sequence_input(&mut self) {
        self.sequence_error = None;
        self.sequence_clean = None;

        let cleaned = sanitize_input(&self.sequence_input);
        if cleaned.is_empty() {
            return;
        }

        if let Some((i, c)) = cleaned.chars().enumerate().find(|(_, c)| !is_standard_base(*c)) {
            self.sequence_error = Some(format!(
                "Sequence contains invalid character '{}' at position {}. Only A, C, G, T are allowed.",
                c,
                i + 1
            ));
            return;
        }

        self.sequence_clean = Some(cleaned);
    }

    fn sequence_length(&self) -> usize {
        self.sequence_clean
            .as_ref()
            .map(|s| s.chars().count())
            .unwrap_or(0)
    }

    fn start_generation(&mut self) {
        let Some(sequence) = self.sequence_clean.clone() else {
            return;
        };

        let forward = sanitize_input(&self.forward_input);
        let reverse = sanitize_input(&self.reverse_input);
        let params = self.params.clone();
        let seed = if self.use_fixed_seed {
            self.seed
        } else {
            rand::random()
        };

        let (results_tx, results_rx) = channel();
        self.results_rx = Some(results_rx);
        self.is_generating = true;
        self.generation_error = None;

        thread::spawn(move || {
            let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
            let result = generate_with_rng(&sequence, &forward, &reverse, &params, &mut rng);
            let _ = results_tx.send(result);
        });
    }

    fn check_generation_progress(&mut self) {
        if let Some(rx) = &self.results_rx {
            if let Ok(result) = rx.try_recv() {
                self.is_generating = false;
                self.results_rx = None;
                match result {
                    Ok(results) => {
                        self.results = Some(results);
                        self.current_tab = Tab::Results;
                    }
                    Err(e) => {
                        self.generation_error = Some(e.to_string());
                    }
                }
            }
        }
    }

    fn save_results(&mut self) {
        let Some(results) = &self.results else {
            self.save_error = Some("No results to save".to_string());
            return;
        };

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_file_name("mutation_results.json")
            .save_file()
        {
            match serde_json::to_string_pretty(results) {
                Ok(json) => {
                    if let Err(e) = std::fs::write(&path, json) {
                        self.save_error = Some(format!("Failed to write file: {}", e));
                    } else {
                        self.save_error = None;
                    }
                }
                Err(e) => {
                    self.save_error = Some(format!("Failed to serialize: {}", e));
                }
            }
        }
    }

    fn load_results(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .pick_file()
        {
            match std::fs::read_to_string(&path) {
                Ok(json) => match serde_json::from_str::<GenerationResults>(&json) {
                    Ok(results) => {
                        self.results = Some(results);
                        self.load_error = None;
                        self.current_tab = Tab::Results;
                    }
                    Err(e) => {
                        self.load_error = Some(format!("Failed to parse: {}", e));
                    }
                },
                Err(e) => {
                    self.load_error = Some(format!("Failed to read file: {}", e));
                }
            }
        }
    }

    fn load_sequence_file(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Text", &["txt", "seq", "fasta", "fa"])
            .pick_file()
        {
            match std::fs::read_to_string(&path) {
                Ok(content) => {
                    // Keep only sequence lines; FASTA headers are dropped
                    self.sequence_input = content
                        .lines()
                        .filter(|line| !line.trim_start().starts_with('>'))
                        .collect::<Vec<_>>()
                        .join("\n");
                    self.parse_sequence_input();
                }
                Err(e) => {
                    self.sequence_error = Some(format!("Failed to read file: {}", e));
                }
            }
        }
    }

    fn export_csv(&mut self) {
        let Some(results) = &self.results else {
            self.export_error = Some("No results to export".to_string());
            return;
        };

        let file_name = format!("{}_mutations.csv", results.params.mode.name());
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV", &["csv"])
            .set_file_name(file_name)
            .save_file()
        {
            match write_variants_csv(&path, results, self.display_column) {
                Ok(()) => self.export_error = None,
                Err(e) => self.export_error = Some(e),
            }
        }
    }

    /// Expected variant count for the current parameters, before sampling
    fn exhaustive_estimate(&self) -> Option<u128> {
        let len = self.sequence_length();
        if len == 0 {
            return None;
        }
        let k = self.params.mode.fixed_k().unwrap_or(self.params.k);
        if k > len {
            return None;
        }
        let count = if self.params.mode.is_deletion() {
            n_choose_k(len, k)
        } else {
            exhaustive_substitution_count(len, k)
        };
        Some(count)
    }
}

impl eframe::App for AptamutApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.is_generating {
            self.check_generation_progress();
            ctx.request_repaint();
        }

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Load Sequence...").clicked() {
                        self.load_sequence_file();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Load Results...").clicked() {
                        self.load_results();
                        ui.close_menu();
                    }
                    if ui.button("Save Results...").clicked() {
                        self.save_results();
                        ui.close_menu();
                    }
                    if ui.button("Export CSV...").clicked() {
                        self.export_csv();
                        ui.close_menu();
                    }
                });
            });
        });

        // Tab bar
        egui::TopBottomPanel::top("tabs").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.current_tab, Tab::Input, "Input Data");
                ui.selectable_value(&mut self.current_tab, Tab::Setup, "Mutation Setup");
                ui.selectable_value(&mut self.current_tab, Tab::Results, "Results");
            });
        });

        // Status bar
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if self.is_generating {
                    ui.spinner();
                    ui.label("Generating variants...");
                } else if let Some(ref results) = self.results {
                    ui.label(format!(
                        "Results: {} variants | {} | {} bp input",
                        results.variants.len(),
                        results.params.mode.description(),
                        results.input_sequence.chars().count()
                    ));
                } else if let Some(ref seq) = self.sequence_clean {
                    let flank_len = sanitize_input(&self.forward_input).chars().count()
                        + sanitize_input(&self.reverse_input).chars().count();
                    ui.label(format!(
                        "Sequence: {} bp | full length with flanks: {} bp",
                        seq.chars().count(),
                        seq.chars().count() + flank_len
                    ));
                } else {
                    ui.label("Enter an aptamer sequence to begin");
                }
            });
        });

        // Main content
        egui::CentralPanel::default().show(ctx, |ui| match self.current_tab {
            Tab::Input => self.show_input_tab(ui),
            Tab::Setup => self.show_setup_tab(ui),
            Tab::Results => self.show_results_tab(ui),
        });
    }
}

impl AptamutApp {
    fn show_input_tab(&mut self, ui: &mut egui::Ui) {
        ui.heading("Input Data");
        ui.separator();

        // --- Aptamer sequence ---
        ui.group(|ui| {
            ui.horizontal(|ui| {
                ui.heading("Aptamer Sequence");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Clear").clicked() {
                        self.sequence_input.clear();
                        self.sequence_clean = None;
                        self.sequence_error = None;
                    }
                    if ui.button("Load File").clicked() {
                        self.load_sequence_file();
                    }
                    if ui.button("Load Example").clicked() {
                        self.sequence_input = EXAMPLE_SEQUENCE.to_string();
                        self.parse_sequence_input();
                    }
                });
            });

            ui.label("Core sequence to mutate (A, C, G, T only; whitespace is ignored):");

            egui::ScrollArea::vertical()
                .id_salt("sequence_scroll")
                .max_height(140.0)
                .show(ui, |ui| {
                    let response = ui.add(
                        egui::TextEdit::multiline(&mut self.sequence_input)
                            .font(egui::TextStyle::Monospace)
                            .desired_width(f32::INFINITY)
                            .desired_rows(4),
                    );
                    if response.changed() {
                        self.parse_sequence_input();
                    }
                });

            if let Some(ref error) = self.sequence_error {
                ui.colored_label(egui::Color32::RED, format!("Error: {}", error));
            }
            if let Some(ref seq) = self.sequence_clean {
                ui.colored_label(
                    egui::Color32::from_rgb(100, 200, 100),
                    format!("Sequence: {} bp", seq.chars().count()),
                );
            }
        });

        ui.add_space(5.0);

        // --- Flanking primers ---
        ui.group(|ui| {
            ui.heading("Flanking Primers");
            ui.label("Fixed strings added around every variant (optional):");

            ui.horizontal(|ui| {
                ui.label("Forward (5'):");
                ui.add(
                    egui::TextEdit::singleline(&mut self.forward_input)
                        .font(egui::TextStyle::Monospace)
                        .desired_width(350.0),
                );
            });
            ui.horizontal(|ui| {
                ui.label("Reverse (3'):");
                ui.add(
                    egui::TextEdit::singleline(&mut self.reverse_input)
                        .font(egui::TextStyle::Monospace)
                        .desired_width(350.0),
                );
            });
        });
    }

    fn show_setup_tab(&mut self, ui: &mut egui::Ui) {
        ui.heading("Mutation Setup");
        ui.separator();

        if self.sequence_clean.is_none() {
            ui.colored_label(
                egui::Color32::YELLOW,
                "Please enter an aptamer sequence in the Input tab.",
            );
            return;
        }

        let seq_len = self.sequence_length();

        egui::ScrollArea::vertical().show(ui, |ui| {
            // Mutation mode selection
            ui.group(|ui| {
                ui.heading("Mutation Mode");
                for mode in MutationMode::ALL {
                    ui.radio_value(&mut self.params.mode, mode, mode.description());
                }
            });

            ui.add_space(10.0);

            // Mutation count for the k-parameterized modes
            if self.params.mode.is_k_parameterized() {
                ui.group(|ui| {
                    ui.heading("Mutation Count");
                    ui.horizontal(|ui| {
                        ui.label("Bases mutated per variant (k):");
                        ui.add(egui::DragValue::new(&mut self.params.k).range(1..=seq_len));
                    });
                });
                if self.params.k > seq_len {
                    self.params.k = seq_len;
                }
                ui.add_space(10.0);
            }

            // Sample size for the sampled/capped modes
            if self.params.mode.uses_sampling() {
                ui.group(|ui| {
                    ui.heading("Sample Size");
                    ui.horizontal(|ui| {
                        ui.label("Maximum variants returned:");
                        ui.add(
                            egui::DragValue::new(&mut self.params.sample_size)
                                .range(1..=MAX_SAMPLE_SIZE),
                        );
                    });
                    ui.label(
                        "When the exhaustive enumeration is larger, a random sample of this size is kept.",
                    );
                });
                ui.add_space(10.0);
            }

            // Deletion options
            if self.params.mode.is_deletion() {
                ui.group(|ui| {
                    ui.heading("Deletion Options");
                    ui.checkbox(
                        &mut self.params.keep_length,
                        "Keep original length (pad with random fill bases)",
                    );
                    ui.horizontal(|ui| {
                        ui.label("Fill side:");
                        for side in [FillSide::FivePrime, FillSide::ThreePrime] {
                            ui.add_enabled_ui(self.params.keep_length, |ui| {
                                ui.radio_value(
                                    &mut self.params.fill_side,
                                    side,
                                    side.description(),
                                );
                            });
                        }
                    });
                    ui.label("One fill string is drawn per run and shared by every variant.");
                });
                ui.add_space(10.0);
            }

            // Randomness
            ui.group(|ui| {
                ui.heading("Randomness");
                ui.horizontal(|ui| {
                    ui.checkbox(&mut self.use_fixed_seed, "Fixed seed:");
                    ui.add_enabled(self.use_fixed_seed, egui::DragValue::new(&mut self.seed));
                });
                ui.label("A fixed seed makes sampled modes and fill bases reproducible.");
            });

            ui.add_space(10.0);

            // Combination size estimate
            if let Some(estimate) = self.exhaustive_estimate() {
                let capped = self.params.mode.uses_sampling()
                    && estimate > self.params.sample_size as u128;
                if capped {
                    ui.label(format!(
                        "Exhaustive enumeration: {} variants, sampled down to {}",
                        estimate, self.params.sample_size
                    ));
                } else {
                    ui.label(format!("Expected variants: {}", estimate));
                }
                if !self.params.mode.uses_sampling() && estimate > MAX_SAMPLE_SIZE as u128 {
                    ui.colored_label(
                        egui::Color32::YELLOW,
                        "Warning: this mode is exhaustive and the output will be large",
                    );
                }
            }

            ui.add_space(20.0);

            // Run button
            ui.horizontal(|ui| {
                let can_run = self.sequence_clean.is_some() && !self.is_generating;
                if ui
                    .add_enabled(can_run, egui::Button::new("Generate Variants"))
                    .clicked()
                {
                    self.start_generation();
                }

                if self.is_generating {
                    ui.spinner();
                    ui.label("Generating...");
                }
            });

            if let Some(ref error) = self.generation_error {
                ui.colored_label(egui::Color32::RED, format!("Error: {}", error));
            }
        });
    }

    fn show_results_tab(&mut self, ui: &mut egui::Ui) {
        if self.results.is_none() {
            ui.heading("Results");
            ui.separator();
            ui.label("No results yet. Generate variants from the Mutation Setup tab.");
            return;
        }

        ui.horizontal(|ui| {
            ui.heading("Results");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Export CSV").clicked() {
                    self.export_csv();
                }
                if ui.button("Save Results").clicked() {
                    self.save_results();
                }
            });
        });
        ui.separator();

        let (n_variants, mode_description, input_len) = {
            let results = self.results.as_ref().unwrap();
            (
                results.variants.len(),
                results.params.mode.description(),
                results.input_sequence.chars().count(),
            )
        };

        ui.horizontal(|ui| {
            ui.label(format!(
                "{} variants | {} | {} bp input",
                n_variants, mode_description, input_len
            ));
            ui.add_space(20.0);
            ui.label("Display:");
            ui.radio_value(
                &mut self.display_column,
                DisplayColumn::Full,
                "Full (with flanks)",
            );
            ui.radio_value(&mut self.display_column, DisplayColumn::Core, "Core only");
        });

        // Error messages
        if let Some(ref error) = self.save_error {
            ui.colored_label(egui::Color32::RED, error);
        }
        if let Some(ref error) = self.load_error {
            ui.colored_label(egui::Color32::RED, error);
        }
        if let Some(ref error) = self.export_error {
            ui.colored_label(egui::Color32::RED, error);
        }

        if n_variants > MAX_DISPLAY_ROWS {
            ui.colored_label(
                egui::Color32::YELLOW,
                format!(
                    "Showing the first {} of {} variants. Export CSV for the full set.",
                    MAX_DISPLAY_ROWS, n_variants
                ),
            );
        }

        ui.add_space(5.0);

        let results = self.results.as_ref().unwrap();
        let variants = &results.variants;
        let shown = n_variants.min(MAX_DISPLAY_ROWS);

        egui::ScrollArea::vertical()
            .id_salt("results_scroll")
            .show(ui, |ui| {
                egui::Grid::new("variants_grid")
                    .striped(true)
                    .min_col_width(50.0)
                    .show(ui, |ui| {
                        ui.strong("#");
                        ui.strong("Sequence");
                        ui.strong("Label");
                        ui.end_row();

                        for i in 0..shown {
                            let sequence = match self.display_column {
                                DisplayColumn::Full => &variants.full_sequences[i],
                                DisplayColumn::Core => &variants.core_sequences[i],
                            };
                            ui.label(format!("{}", i + 1));
                            ui.add(
                                egui::Label::new(
                                    egui::RichText::new(sequence).monospace().size(11.0),
                                )
                                .wrap_mode(egui::TextWrapMode::Extend),
                            );
                            ui.label(&variants.labels[i]);
                            ui.end_row();
                        }
                    });
            });
    }
}

/// Write the two-column (sequence, label) table for the selected display column
fn write_variants_csv(
    path: &Path,
    results: &GenerationResults,
    column: DisplayColumn,
) -> Result<(), String> {
    let mut writer =
        csv::Writer::from_path(path).map_err(|e| format!("Failed to create file: {}", e))?;

    writer
        .write_record(["sequence", "label"])
        .map_err(|e| format!("Failed to write header: {}", e))?;

    let variants = &results.variants;
    for i in 0..variants.len() {
        let sequence = match column {
            DisplayColumn::Full => &variants.full_sequences[i],
            DisplayColumn::Core => &variants.core_sequences[i],
        };
        writer
            .write_record([sequence.as_str(), variants.labels[i].as_str()])
            .map_err(|e| format!("Failed to write record: {}", e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to write file: {}", e))
}

const EXAMPLE_SEQUENCE: &str = "ATGCGTACGTAGCTAGCTAGCTAGCTAGC";
