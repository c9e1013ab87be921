//! Exercise programmes selected by BMI band

use serde::Serialize;
use std::fmt;

use super::bands::classify;
use super::types::{BmiCategory, BmiValue};

/// How demanding an exercise is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Difficulty {
    Beginner,
    BeginnerIntermediate,
    Intermediate,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Difficulty::Beginner => "beginner",
            Difficulty::BeginnerIntermediate => "beginner-intermediate",
            Difficulty::Intermediate => "intermediate",
        };
        f.write_str(label)
    }
}

/// A single exercise card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub name: &'static str,
    pub description: &'static str,
    pub duration: &'static str,
    pub difficulty: Difficulty,
    /// Estimated kcal burned per session, as a range
    pub calories: &'static str,
    pub video_id: &'static str,
    pub instructions: &'static [&'static str],
}

impl Exercise {
    /// Demonstration video for this exercise
    pub fn video_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.video_id)
    }
}

/// A titled set of exercises for one band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExercisePlan {
    pub title: &'static str,
    pub exercises: &'static [Exercise],
}

pub const BASIC_STRETCHING: ExercisePlan = ExercisePlan {
    title: "Not enough information - basic stretching",
    exercises: &[Exercise {
        name: "Basic stretching",
        description: "Loosen up with a full-body stretch",
        duration: "10-15 min",
        difficulty: Difficulty::Beginner,
        calories: "20-30",
        video_id: "L_xrDAtykMM",
        instructions: &[
            "Slowly roll your neck and shoulders",
            "Raise your arms overhead and stretch side to side",
            "Extend each leg forward and back to stretch the thighs",
            "Gently twist at the waist",
        ],
    }],
};

pub const MUSCLE_GAIN: ExercisePlan = ExercisePlan {
    title: "Underweight - build muscle mass",
    exercises: &[
        Exercise {
            name: "Knee push-up",
            description: "Entry-level upper body strength",
            duration: "15-20 min",
            difficulty: Difficulty::Beginner,
            calories: "80-120",
            video_id: "IODxDxX7oi4",
            instructions: &[
                "Knees on the floor, hands shoulder-width apart",
                "Keep your body in a straight line and lower slowly",
                "Lower until your chest nears the floor, then push up",
                "3 sets of 10, 1 minute rest between sets",
            ],
        },
        Exercise {
            name: "Squat",
            description: "The fundamental lower body strength exercise",
            duration: "15-20 min",
            difficulty: Difficulty::Beginner,
            calories: "100-150",
            video_id: "YaXPRqUwItQ",
            instructions: &[
                "Stand with feet shoulder-width apart",
                "Sit back without letting the knees pass the toes",
                "Descend until the thighs are parallel to the floor",
                "3 sets of 15, 1 minute rest between sets",
            ],
        },
        Exercise {
            name: "Plank",
            description: "Core strength",
            duration: "10-15 min",
            difficulty: Difficulty::Beginner,
            calories: "60-90",
            video_id: "pSHjTRCQxIw",
            instructions: &[
                "Support yourself on elbows and toes",
                "Keep a straight line from head to heels",
                "Hold 30 seconds, 3 sets",
                "30 seconds rest between sets",
            ],
        },
    ],
};

pub const BALANCED: ExercisePlan = ExercisePlan {
    title: "Normal weight - balanced training",
    exercises: &[
        Exercise {
            name: "Burpee",
            description: "Compound move for full-body strength and endurance",
            duration: "20-25 min",
            difficulty: Difficulty::Intermediate,
            calories: "200-300",
            video_id: "qLBImHhCXSw",
            instructions: &[
                "From standing, drop into a squat",
                "Place hands on the floor and kick back into a plank",
                "Do one push-up",
                "Pull the legs back in and jump up",
                "3 sets of 10, 2 minutes rest between sets",
            ],
        },
        Exercise {
            name: "Mountain climber",
            description: "Cardio endurance and core strength",
            duration: "15-20 min",
            difficulty: Difficulty::Intermediate,
            calories: "150-200",
            video_id: "kLh-uczlPLg",
            instructions: &[
                "Start in a plank",
                "Drive one knee toward the chest",
                "Alternate legs quickly",
                "30 seconds on, 30 seconds off, 5 rounds",
            ],
        },
        Exercise {
            name: "Lunge",
            description: "Lower body strength and balance",
            duration: "15-20 min",
            difficulty: Difficulty::Intermediate,
            calories: "120-180",
            video_id: "QOVaHwm-Q6U",
            instructions: &[
                "Take a long step forward",
                "Front knee at 90 degrees, back knee just above the floor",
                "Stand back up and switch legs",
                "3 sets of 12 per leg",
            ],
        },
    ],
};

pub const WEIGHT_LOSS: ExercisePlan = ExercisePlan {
    title: "Pre-overweight - weight loss training",
    exercises: &[
        Exercise {
            name: "Cardio interval training",
            description: "High-intensity intervals for efficient fat burning",
            duration: "25-30 min",
            difficulty: Difficulty::Intermediate,
            calories: "250-350",
            video_id: "ml6cT4AZdqI",
            instructions: &[
                "30 seconds high intensity (jumping jacks, burpees)",
                "30 seconds low intensity (marching in place)",
                "Repeat for 15-20 rounds",
                "5 minutes warm-up and cool-down",
            ],
        },
        Exercise {
            name: "Jumping jack",
            description: "Full-body cardio",
            duration: "20 min",
            difficulty: Difficulty::BeginnerIntermediate,
            calories: "200-280",
            video_id: "iSSAk4XCsRA",
            instructions: &[
                "Stand with feet together and arms at your sides",
                "Jump, spreading the legs and raising the arms overhead",
                "Jump back to the starting position",
                "1 minute on, 30 seconds rest, 10 sets",
            ],
        },
        Exercise {
            name: "Stair climbing",
            description: "Everyday cardio",
            duration: "20-30 min",
            difficulty: Difficulty::BeginnerIntermediate,
            calories: "180-250",
            video_id: "tkG1RgixTMU",
            instructions: &[
                "Climb up and down stairs at a steady pace",
                "Take two steps at a time to raise the intensity",
                "10 minutes continuous, 2 minutes rest",
                "3 sets in total",
            ],
        },
    ],
};

pub const LOW_INTENSITY: ExercisePlan = ExercisePlan {
    title: "Obese - low-intensity start",
    exercises: &[
        Exercise {
            name: "Walking",
            description: "Basic cardio that is easy on the joints",
            duration: "30-45 min",
            difficulty: Difficulty::Beginner,
            calories: "150-220",
            video_id: "RBxgDQqo9Po",
            instructions: &[
                "Start at a comfortable pace and speed up gradually",
                "Walk 10 minutes, rest 2 minutes",
                "Keep going for 30-45 minutes in total",
                "Aim for 5 or more days a week",
            ],
        },
        Exercise {
            name: "Chair exercises",
            description: "Safe seated routine",
            duration: "20-25 min",
            difficulty: Difficulty::Beginner,
            calories: "80-120",
            video_id: "sTANio_2E0Q",
            instructions: &[
                "Seated arm circles, 20 reps",
                "Seated leg raises, 15 reps",
                "Shoulder shrugs, 20 reps",
                "Neck turns, 10 each side",
            ],
        },
        Exercise {
            name: "Water walking",
            description: "Low-impact exercise in the pool",
            duration: "30-40 min",
            difficulty: Difficulty::Beginner,
            calories: "200-300",
            video_id: "F1DbIjzfBEI",
            instructions: &[
                "Walk slowly in waist-deep water",
                "Swing the arms widely as you walk",
                "Walk forwards, backwards and sideways",
                "Use the water's resistance in every move",
            ],
        },
    ],
};

/// Plan for a category
pub fn plan_for(category: BmiCategory) -> &'static ExercisePlan {
    match category {
        BmiCategory::Unknown => &BASIC_STRETCHING,
        BmiCategory::Underweight => &MUSCLE_GAIN,
        BmiCategory::Normal => &BALANCED,
        BmiCategory::PreOverweight => &WEIGHT_LOSS,
        BmiCategory::Obese1 | BmiCategory::Obese2 => &LOW_INTENSITY,
    }
}

/// Plan for a BMI reading, selected through the band table
pub fn exercise_plan(bmi: impl Into<BmiValue>) -> &'static ExercisePlan {
    plan_for(classify(bmi))
}
