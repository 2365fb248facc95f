use gloo_timers::callback::Timeout;
use web_sys::{KeyboardEvent, MouseEvent};
use yew::prelude::*;

use crate::reveal::{stagger_item_style, use_staggered_reveal, RevealKind};

pub const MEMBERS_PER_SLIDE: usize = 3;
const TRANSITION_MS: u32 = 300;
const STAGGER_STEP_MS: u32 = 100;

struct TeamMember {
    name: &'static str,
    role: &'static str,
    bio: &'static str,
    image: &'static str,
    image_alt: &'static str,
}

const TEAM_MEMBERS: &[TeamMember] = &[
    TeamMember {
        name: "Rafael Antoni",
        role: "Founder & CEO",
        bio: "Thirty years of development experience across the Caribbean.",
        image: "/img/team-rafael.png",
        image_alt: "Portrait of Rafael Antoni",
    },
    TeamMember {
        name: "Carolina Mejía",
        role: "Lead Architect",
        bio: "Designs every Antoni community around light, air, and landscape.",
        image: "/img/team-carolina.png",
        image_alt: "Portrait of Carolina Mejía",
    },
    TeamMember {
        name: "Luis Fernández",
        role: "Construction Director",
        bio: "Keeps ninety trades moving on schedule across our active sites.",
        image: "/img/team-luis.png",
        image_alt: "Portrait of Luis Fernández",
    },
    TeamMember {
        name: "María Rodríguez",
        role: "Sustainability Lead",
        bio: "Brings solar, water, and material strategy to every project.",
        image: "/img/team-maria.png",
        image_alt: "Portrait of María Rodríguez",
    },
    TeamMember {
        name: "José Tavárez",
        role: "Client Relations",
        bio: "The first call for every owner, from reservation to key handover.",
        image: "/img/team-jose.png",
        image_alt: "Portrait of José Tavárez",
    },
    TeamMember {
        name: "Ana Castillo",
        role: "Finance Director",
        bio: "Structures the partnerships behind each development.",
        image: "/img/team-ana.png",
        image_alt: "Portrait of Ana Castillo",
    },
];

/// Number of carousel pages for a member count, three members per page.
/// An empty roster still renders one (empty) page.
pub fn slide_count(member_count: usize) -> usize {
    ((member_count + MEMBERS_PER_SLIDE - 1) / MEMBERS_PER_SLIDE).max(1)
}

/// Pure carousel state machine. Navigation while a transition is running
/// is a no-op; `settle` returns to idle once the 300 ms window elapses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Carousel {
    current: usize,
    total: usize,
    animating: bool,
    show_all: bool,
}

impl Carousel {
    pub fn new(member_count: usize) -> Self {
        Self {
            current: 0,
            total: slide_count(member_count),
            animating: false,
            show_all: false,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total_slides(&self) -> usize {
        self.total
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    pub fn next(self) -> Self {
        if self.animating || self.show_all {
            return self;
        }
        Self {
            current: (self.current + 1) % self.total,
            animating: true,
            ..self
        }
    }

    pub fn previous(self) -> Self {
        if self.animating || self.show_all {
            return self;
        }
        let current = if self.current == 0 {
            self.total - 1
        } else {
            self.current - 1
        };
        Self {
            current,
            animating: true,
            ..self
        }
    }

    pub fn go_to(self, index: usize) -> Self {
        if self.animating || self.show_all || index == self.current || index >= self.total {
            return self;
        }
        Self {
            current: index,
            animating: true,
            ..self
        }
    }

    pub fn settle(self) -> Self {
        Self {
            animating: false,
            ..self
        }
    }

    /// Switches the track to the all-members grid. There is no way back;
    /// navigation is inert from here on.
    pub fn show_all(self) -> Self {
        Self {
            show_all: true,
            ..self
        }
    }

    pub fn showing_all(&self) -> bool {
        self.show_all
    }

    /// Prev is flagged disabled on the first page, next on the last, as
    /// the original controls did, even though the wrap operations make
    /// both ends reachable from each other.
    pub fn prev_disabled(&self) -> bool {
        self.current == 0
    }

    pub fn next_disabled(&self) -> bool {
        self.current + 1 == self.total
    }

    pub fn track_transform(&self) -> String {
        format!("translateX(-{}%)", self.current * 100)
    }
}

#[function_component(Team)]
pub fn team() -> Html {
    let section_ref = use_node_ref();
    let revealed = use_staggered_reveal(section_ref.clone(), TEAM_MEMBERS.len(), STAGGER_STEP_MS);
    let carousel = use_state(|| Carousel::new(TEAM_MEMBERS.len()));

    // Whenever a transition starts, settle it after the 300 ms window.
    // A state change in between drops (and thereby cancels) the timer.
    {
        let handle = carousel.clone();
        use_effect_with_deps(
            move |state: &Carousel| {
                let mut pending = None;
                if state.is_animating() {
                    let settled = state.settle();
                    pending = Some(Timeout::new(TRANSITION_MS, move || handle.set(settled)));
                }
                move || drop(pending)
            },
            *carousel,
        );
    }

    let on_prev = {
        let carousel = carousel.clone();
        Callback::from(move |_: MouseEvent| carousel.set(carousel.previous()))
    };
    let on_next = {
        let carousel = carousel.clone();
        Callback::from(move |_: MouseEvent| carousel.set(carousel.next()))
    };
    let on_keydown = {
        let carousel = carousel.clone();
        Callback::from(move |e: KeyboardEvent| match e.key().as_str() {
            "ArrowLeft" => {
                e.prevent_default();
                carousel.set(carousel.previous());
            }
            "ArrowRight" => {
                e.prevent_default();
                carousel.set(carousel.next());
            }
            _ => {}
        })
    };
    let on_show_all = {
        let carousel = carousel.clone();
        Callback::from(move |_: MouseEvent| carousel.set(carousel.show_all()))
    };

    let member_card = |global_index: usize, member: &TeamMember| -> Html {
        html! {
            <div
                class="team-member"
                key={member.name}
                style={stagger_item_style(*revealed, global_index, RevealKind::FadeUp)}
            >
                <div class="member-photo">
                    <img src={member.image} alt={member.image_alt} loading="lazy" width="150" height="150" />
                </div>
                <h4 class="member-name">{member.name}</h4>
                <p class="member-role">{member.role}</p>
                <p class="member-bio">{member.bio}</p>
            </div>
        }
    };

    let track = if carousel.showing_all() {
        html! {
            <div class="team-carousel show-all">
                { for TEAM_MEMBERS.iter().enumerate().map(|(index, member)| member_card(index, member)) }
            </div>
        }
    } else {
        let slides = TEAM_MEMBERS
            .chunks(MEMBERS_PER_SLIDE)
            .enumerate()
            .map(|(slide_index, members)| {
                html! {
                    <div class="carousel-slide" key={slide_index}>
                        { for members.iter().enumerate().map(|(offset, member)| {
                            member_card(slide_index * MEMBERS_PER_SLIDE + offset, member)
                        }) }
                    </div>
                }
            });
        html! {
            <div
                class="team-carousel"
                style={format!(
                    "transform: {}; transition: transform {}ms ease;",
                    carousel.track_transform(),
                    TRANSITION_MS
                )}
            >
                { for slides }
            </div>
        }
    };

    let controls = if carousel.showing_all() {
        html! {}
    } else {
        html! {
            <>
                <button
                    class="carousel-nav prev"
                    aria-label="Previous team members"
                    disabled={carousel.prev_disabled()}
                    style={format!("opacity: {};", if carousel.prev_disabled() { "0.5" } else { "1" })}
                    onclick={on_prev}
                >
                    {"‹"}
                </button>
                <button
                    class="carousel-nav next"
                    aria-label="Next team members"
                    disabled={carousel.next_disabled()}
                    style={format!("opacity: {};", if carousel.next_disabled() { "0.5" } else { "1" })}
                    onclick={on_next}
                >
                    {"›"}
                </button>
            </>
        }
    };

    html! {
        <section id="team" class="team" ref={section_ref}>
            <div class="section-container">
                <h2 class="section-title">{"Our Team"}</h2>
                <div class="team-carousel-container" tabindex="0" onkeydown={on_keydown}>
                    { track }
                    { controls }
                </div>
                {
                    if !carousel.showing_all() {
                        html! {
                            <button class="btn btn-outline team-show-all" onclick={on_show_all}>
                                {"View All Members"}
                            </button>
                        }
                    } else {
                        html! {}
                    }
                }
            </div>
            <style>
                {r#"
                .team {
                    padding: 6rem 0;
                    background: var(--bg-secondary);
                }

                .team-carousel-container {
                    position: relative;
                    overflow: hidden;
                    margin-top: 3rem;
                }

                .team-carousel {
                    display: flex;
                }

                .team-carousel.show-all {
                    display: grid;
                    grid-template-columns: repeat(auto-fit, minmax(240px, 1fr));
                    gap: 2rem;
                    transform: none;
                }

                .carousel-slide {
                    flex: 0 0 100%;
                    display: grid;
                    grid-template-columns: repeat(3, 1fr);
                    gap: 2rem;
                }

                .team-member {
                    text-align: center;
                    padding: 1.5rem;
                }

                .member-photo img {
                    border-radius: 50%;
                    margin-bottom: 1rem;
                }

                .member-name {
                    font-size: 1.1rem;
                    margin-bottom: 0.25rem;
                }

                .member-role {
                    color: var(--accent);
                    font-size: 0.9rem;
                    margin-bottom: 0.75rem;
                }

                .member-bio {
                    color: var(--text-secondary);
                    font-size: 0.95rem;
                    line-height: 1.5;
                }

                .carousel-nav {
                    position: absolute;
                    top: 50%;
                    transform: translateY(-50%);
                    background: #ffffff;
                    border: 1px solid var(--border);
                    border-radius: 50%;
                    width: 44px;
                    height: 44px;
                    font-size: 1.5rem;
                    cursor: pointer;
                }

                .carousel-nav.prev { left: 0.5rem; }
                .carousel-nav.next { right: 0.5rem; }

                .team-show-all {
                    display: block;
                    margin: 2.5rem auto 0;
                }

                @media (max-width: 767px) {
                    .carousel-slide {
                        grid-template-columns: 1fr;
                    }
                }
                "#}
            </style>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn slide_count_is_ceiling_of_thirds() {
        assert_eq!(slide_count(0), 1);
        assert_eq!(slide_count(1), 1);
        assert_eq!(slide_count(3), 1);
        assert_eq!(slide_count(4), 2);
        assert_eq!(slide_count(6), 2);
        assert_eq!(slide_count(7), 3);
    }

    #[test]
    fn next_cycles_back_to_origin() {
        for member_count in [1, 3, 4, 7, 10] {
            let mut carousel = Carousel::new(member_count);
            let total = carousel.total_slides();
            for _ in 0..total {
                carousel = carousel.next().settle();
            }
            assert_eq!(carousel.current(), 0, "members = {}", member_count);
        }
    }

    #[test]
    fn previous_inverts_next() {
        let carousel = Carousel::new(7);
        let advanced = carousel.next().settle();
        assert_eq!(advanced.previous().settle().current(), carousel.current());
        // And wrapping from zero lands on the last page.
        assert_eq!(carousel.previous().settle().current(), 2);
    }

    #[test]
    fn navigation_is_blocked_while_transitioning() {
        let carousel = Carousel::new(7).next();
        assert!(carousel.is_animating());
        assert_eq!(carousel.next(), carousel);
        assert_eq!(carousel.previous(), carousel);
        assert_eq!(carousel.go_to(2), carousel);
    }

    #[test]
    fn go_to_current_or_out_of_range_is_noop() {
        let carousel = Carousel::new(7);
        assert_eq!(carousel.go_to(0), carousel);
        assert_eq!(carousel.go_to(3), carousel);
        assert_eq!(carousel.go_to(2).settle().current(), 2);
    }

    #[test]
    fn show_all_is_irreversible_and_freezes_navigation() {
        let grid = Carousel::new(7).show_all();
        assert!(grid.showing_all());
        assert_eq!(grid.next(), grid);
        assert_eq!(grid.previous(), grid);
        assert_eq!(grid.go_to(1), grid);
        // No operation leaves the grid view.
        assert!(grid.settle().showing_all());
    }

    #[test]
    fn show_all_survives_a_running_transition() {
        let carousel = Carousel::new(7).next().show_all();
        assert!(carousel.showing_all());
        assert!(carousel.settle().showing_all());
    }

    #[test]
    fn boundary_button_states() {
        let carousel = Carousel::new(7);
        assert!(carousel.prev_disabled());
        assert!(!carousel.next_disabled());

        let last = carousel.go_to(2).settle();
        assert!(!last.prev_disabled());
        assert!(last.next_disabled());
    }

    #[test]
    fn track_translate_is_full_pages() {
        let carousel = Carousel::new(7);
        assert_eq!(carousel.track_transform(), "translateX(-0%)");
        assert_eq!(carousel.next().track_transform(), "translateX(-100%)");
        assert_eq!(carousel.go_to(2).track_transform(), "translateX(-200%)");
    }
}
